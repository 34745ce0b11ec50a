//! Configuration for release host connections.
use secrecy::SecretString;

/// Default GitHub REST API base url.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Program invoked by the gh backend.
pub const DEFAULT_GH_PROGRAM: &str = "gh";

/// Connection settings for the GitHub REST API backend.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// REST API base url (e.g. "https://api.github.com").
    pub api_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

/// Settings for the gh command-line backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhCliConfig {
    /// Program to run, normally `gh`.
    pub program: String,
    /// Passed as `--repo`; gh falls back to the repository of the working
    /// directory when unset.
    pub repo: Option<String>,
}

impl Default for GhCliConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_GH_PROGRAM.to_string(),
            repo: None,
        }
    }
}

#[derive(Debug, Clone)]
/// Supported release host backends.
pub enum Remote {
    Github(RemoteConfig),
    GhCli(GhCliConfig),
}

/// Behaviour shared by every backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostOptions {
    /// Log mutating operations instead of performing them.
    pub dry_run: bool,
}
