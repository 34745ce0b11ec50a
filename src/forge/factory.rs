//! Factory for creating release host implementations based on configuration.

use crate::{
    Result,
    forge::{
        config::{GhCliConfig, HostOptions, Remote, RemoteConfig},
        gh_cli::GhCli,
        github::Github,
        manager::ReleaseManager,
        traits::ReleaseHost,
    },
};

/// Factory for creating release host implementations.
pub struct HostFactory;

impl HostFactory {
    /// Create a ReleaseManager instance based on the Remote configuration.
    pub fn create(
        remote: &Remote,
        options: HostOptions,
    ) -> Result<ReleaseManager> {
        let host: Box<dyn ReleaseHost> = match remote {
            Remote::Github(config) => Self::create_github(config)?,
            Remote::GhCli(config) => Self::create_gh_cli(config),
        };

        Ok(ReleaseManager::new(host, options))
    }

    fn create_github(config: &RemoteConfig) -> Result<Box<dyn ReleaseHost>> {
        Ok(Box::new(Github::new(config.clone())?))
    }

    fn create_gh_cli(config: &GhCliConfig) -> Box<dyn ReleaseHost> {
        Box::new(GhCli::new(config.clone()))
    }
}
