//! Typed errors for the failures release-floater reports to the user.

use thiserror::Error;

/// Main error type for release-floater operations.
#[derive(Error, Debug)]
pub enum FloaterError {
    // Configuration errors
    #[error(
        "no release reference provided: pass --ref or set RELEASE_FLOATER_REF or GITHUB_REF"
    )]
    MissingRef,

    #[error("no repository configured: pass --repo or set GITHUB_REPOSITORY")]
    MissingRepo,

    #[error(
        "invalid repository '{0}': expected owner/repo or an http(s) url"
    )]
    InvalidRepo(String),

    #[error("no token configured: pass --token or set GITHUB_TOKEN or GH_TOKEN")]
    MissingToken,

    // Parse errors
    #[error("invalid release tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    // Release host errors
    #[error("Release host operation failed: {0}")]
    Host(String),

    #[error("command `{command}` failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("interrupted before propagation finished")]
    Interrupted,
}

impl FloaterError {
    /// Create an invalid tag error
    pub fn invalid_tag(
        tag: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a release host error with context
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }
}
