use clap::Parser;
use log::*;

use release_floater::{
    Result,
    cli,
    command::propagate::{self, PropagationReport},
    error::FloaterError,
    forge::{config::HostOptions, factory::HostFactory},
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_floater")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

/// Resolves when the process is asked to stop.
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}

fn log_report(report: &PropagationReport) {
    for target in report.targets.iter() {
        info!(
            "{}: {:?}, {} asset(s) from {}",
            target.target,
            target.state,
            target.uploaded,
            report.source.tag
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let request = cli_args.propagate_request()?;
    let remote = cli_args.get_remote()?;
    let manager = HostFactory::create(
        &remote,
        HostOptions {
            dry_run: cli_args.dry_run,
        },
    )?;

    debug!("using release host: {}", manager.host_name());

    // dropping the pipeline on a signal removes the asset cache
    let report = tokio::select! {
        result = propagate::execute(&manager, request) => result?,
        signal = shutdown_signal() => {
            signal?;
            warn!("interrupted, discarding downloaded assets");
            return Err(FloaterError::Interrupted.into());
        }
    };

    log_report(&report);

    Ok(())
}
