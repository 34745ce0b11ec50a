//! Access to the service hosting releases and their assets.
//!
//! Every backend implements [`traits::ReleaseHost`]; commands talk to it
//! through [`manager::ReleaseManager`], which adds logging and dry-run
//! handling on top.

/// Backend selection and connection settings.
pub mod config;

/// Builds the configured backend.
pub mod factory;

/// Backend driving the `gh` command-line tool.
pub mod gh_cli;

/// GitHub REST API backend.
pub mod github;

/// Wrapper adding logging and dry-run behaviour to any backend.
pub mod manager;

/// Request types passed to backends.
pub mod request;

/// The release host abstraction.
pub mod traits;
