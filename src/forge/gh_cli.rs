//! Implements the ReleaseHost trait by driving the `gh` command-line tool
use async_trait::async_trait;
use log::*;
use std::{
    ffi::{OsStr, OsString},
    path::Path,
    process::{Output, Stdio},
};
use tokio::process::Command;

use crate::{
    Result,
    error::FloaterError,
    forge::{
        config::GhCliConfig,
        request::{CreateReleaseRequest, UploadAssetRequest},
        traits::ReleaseHost,
    },
};

/// Substring gh prints on stderr when a tag has no release.
const RELEASE_NOT_FOUND: &str = "release not found";
/// Substring gh prints on stderr when a release carries no assets.
const NO_ASSETS: &str = "no assets to download";

/// Release host backed by the `gh` CLI, which brings its own authentication.
pub struct GhCli {
    config: GhCliConfig,
}

impl GhCli {
    pub fn new(config: GhCliConfig) -> Self {
        Self { config }
    }

    /// Build `release <subcommand> <args..> [--repo <repo>]`.
    fn release_args<I, S>(&self, subcommand: &str, args: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut all: Vec<OsString> = vec!["release".into(), subcommand.into()];

        all.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));

        if let Some(repo) = &self.config.repo {
            all.push("--repo".into());
            all.push(repo.into());
        }

        all
    }

    fn download_args(&self, tag: &str, dir: &Path) -> Vec<OsString> {
        self.release_args(
            "download",
            [OsStr::new(tag), OsStr::new("--dir"), dir.as_os_str()],
        )
    }

    fn view_args(&self, tag: &str) -> Vec<OsString> {
        self.release_args("view", [tag, "--json", "tagName"])
    }

    fn create_args(&self, req: &CreateReleaseRequest) -> Vec<OsString> {
        self.release_args(
            "create",
            [
                req.tag.as_str(),
                "--title",
                req.title.as_str(),
                "--notes",
                req.notes.as_str(),
            ],
        )
    }

    fn upload_args(&self, req: &UploadAssetRequest) -> Vec<OsString> {
        let mut args = vec![OsStr::new(&req.tag), req.path.as_os_str()];

        if req.overwrite {
            args.push(OsStr::new("--clobber"));
        }

        self.release_args("upload", args)
    }

    fn display_command(&self, args: &[OsString]) -> String {
        let mut parts = vec![self.config.program.clone()];
        parts.extend(args.iter().map(|a| a.to_string_lossy().to_string()));
        parts.join(" ")
    }

    /// Run gh and capture its output without checking the exit status. The
    /// child is killed if the returned future is dropped.
    async fn output(&self, args: &[OsString]) -> Result<Output> {
        debug!("running: {}", self.display_command(args));

        let output = Command::new(&self.config.program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| {
                FloaterError::host(format!(
                    "failed to run {}: {err}",
                    self.config.program
                ))
            })?;

        Ok(output)
    }

    /// Run gh, failing on a non-zero exit status.
    async fn run(&self, args: Vec<OsString>) -> Result<Output> {
        let output = self.output(&args).await?;

        if !output.status.success() {
            return Err(self.command_failed(&args, &output).into());
        }

        Ok(output)
    }

    fn command_failed(
        &self,
        args: &[OsString],
        output: &Output,
    ) -> FloaterError {
        FloaterError::CommandFailed {
            command: self.display_command(args),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

#[async_trait]
impl ReleaseHost for GhCli {
    fn name(&self) -> &'static str {
        "gh"
    }

    async fn download_assets(&self, tag: &str, dir: &Path) -> Result<()> {
        let args = self.download_args(tag, dir);
        let output = self.output(&args).await?;

        if output.status.success() {
            return Ok(());
        }

        if String::from_utf8_lossy(&output.stderr).contains(NO_ASSETS) {
            debug!("release {tag} has no assets to download");
            return Ok(());
        }

        Err(self.command_failed(&args, &output).into())
    }

    async fn release_exists(&self, tag: &str) -> Result<bool> {
        let args = self.view_args(tag);
        let output = self.output(&args).await?;

        if output.status.success() {
            return Ok(true);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);

        if stderr.contains(RELEASE_NOT_FOUND) {
            return Ok(false);
        }

        Err(self.command_failed(&args, &output).into())
    }

    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()> {
        self.run(self.create_args(&req)).await?;
        Ok(())
    }

    async fn upload_asset(&self, req: UploadAssetRequest) -> Result<()> {
        self.run(self.upload_args(&req)).await?;
        Ok(())
    }
}
