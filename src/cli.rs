//! CLI argument parsing and release host configuration.
use clap::{Parser, ValueEnum};
use color_eyre::eyre::eyre;
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::env;

use crate::{
    Result,
    command::propagate::PropagateRequest,
    error::FloaterError,
    forge::config::{
        DEFAULT_API_URL, DEFAULT_GH_PROGRAM, GhCliConfig, Remote,
        RemoteConfig,
    },
};

/// Overrides `GITHUB_REF` as the source of the release reference.
pub const REF_OVERRIDE_ENV: &str = "RELEASE_FLOATER_REF";
/// Reference set by GitHub Actions for the triggering tag.
pub const GITHUB_REF_ENV: &str = "GITHUB_REF";
/// Token fallback used by the gh CLI.
pub const GH_TOKEN_ENV: &str = "GH_TOKEN";

/// Release host implementation to talk to.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// GitHub REST API.
    Api,
    /// The gh command-line tool.
    Gh,
}

/// Mirror the assets of a tagged release onto its floating major and minor
/// releases (v1.2.3 feeds 1.x.x and 1.2.x).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long = "ref", env = REF_OVERRIDE_ENV)]
    /// Reference of the source release (e.g. refs/tags/v1.2.3). Falls back to
    /// GITHUB_REF env var.
    pub reference: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY")]
    /// Repository as owner/repo or https://github.com/owner/repo.
    pub repo: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    /// GitHub access token. Falls back to GH_TOKEN env var.
    pub token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    /// GitHub REST API base url.
    pub api_url: String,

    #[arg(
        long,
        value_enum,
        env = "RELEASE_FLOATER_BACKEND",
        default_value_t = Backend::Api
    )]
    /// How to reach the release host.
    pub backend: Backend,

    #[arg(long)]
    /// Notes for floating releases that have to be created.
    pub notes: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Log release creation and uploads instead of performing them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Resolve the source release reference from arguments or environment.
    pub fn reference(&self) -> Result<String> {
        let mut reference = self.reference.clone().unwrap_or_default();

        if reference.is_empty()
            && let Ok(env_var_ref) = env::var(GITHUB_REF_ENV)
        {
            reference = env_var_ref;
        }

        if reference.is_empty() {
            return Err(FloaterError::MissingRef.into());
        }

        Ok(reference)
    }

    /// Build the propagation request for this invocation.
    pub fn propagate_request(&self) -> Result<PropagateRequest> {
        Ok(PropagateRequest {
            reference: self.reference()?,
            notes: self.notes.clone(),
        })
    }

    /// Configure the release host connection from CLI arguments.
    pub fn get_remote(&self) -> Result<Remote> {
        match self.backend {
            Backend::Api => get_github_remote(
                self.repo.as_deref(),
                self.token.as_deref(),
                &self.api_url,
            ),
            Backend::Gh => Ok(Remote::GhCli(GhCliConfig {
                program: DEFAULT_GH_PROGRAM.to_string(),
                repo: self.repo.clone().filter(|r| !r.is_empty()),
            })),
        }
    }
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(eyre!(
            "only http and https schemes are supported for repo urls"
        )),
    }
}

/// Split `owner/repo` or an http(s) repository url into owner and name.
fn parse_repo(repo: &str) -> Result<(String, String)> {
    if repo.contains("://") {
        let parsed = GitUrl::parse(repo)
            .map_err(|err| eyre!("failed to parse repo url {repo}: {err}"))?;

        validate_scheme(parsed.scheme)?;

        let owner = parsed
            .owner
            .ok_or(FloaterError::InvalidRepo(repo.to_string()))?;

        return Ok((owner, parsed.name));
    }

    match repo.split('/').collect::<Vec<&str>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(FloaterError::InvalidRepo(repo.to_string()).into()),
    }
}

/// Configure GitHub API remote with repository parsing and token resolution.
fn get_github_remote(
    repo: Option<&str>,
    token: Option<&str>,
    api_url: &str,
) -> Result<Remote> {
    let repo = repo.unwrap_or_default();

    if repo.is_empty() {
        return Err(FloaterError::MissingRepo.into());
    }

    let (owner, name) = parse_repo(repo)?;

    let mut token = token.unwrap_or_default().to_string();

    if token.is_empty()
        && let Ok(env_var_token) = env::var(GH_TOKEN_ENV)
    {
        token = env_var_token;
    }

    if token.is_empty() {
        return Err(FloaterError::MissingToken.into());
    }

    let remote_config = RemoteConfig {
        api_url: api_url.trim_end_matches('/').to_string(),
        owner,
        repo: name,
        token: SecretString::from(token),
    };

    Ok(Remote::Github(remote_config))
}
