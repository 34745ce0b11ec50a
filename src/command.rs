//! Command execution for release-floater.
//!
//! The tool runs a single workflow, [`propagate`]: resolve the source tag,
//! compute the floating targets, download the source assets into a scoped
//! cache, then publish them to the major and the minor floating release in
//! that order. The first failure aborts the rest of the run.
//!
//! Commands support dry-run mode through the `--dry-run` CLI flag. Reads and
//! downloads still happen; release creation and uploads are only logged.

/// Propagation of a tagged release's assets to its floating releases.
pub mod propagate;
