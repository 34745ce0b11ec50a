//! Result type shared across release-floater.
//!
//! Every fallible operation returns [`Result`], a `color-eyre` report, so that
//! context added with `.wrap_err()` along the way ends up in the message
//! printed when the run aborts.
//!
//! ```rust,ignore
//! use color_eyre::eyre::Context;
//! use crate::result::Result;
//!
//! async fn fetch(cache: &AssetCache, manager: &ReleaseManager) -> Result<()> {
//!     cache
//!         .fetch(manager, "v1.2.3")
//!         .await
//!         .wrap_err("failed to fetch source assets")?;
//!     Ok(())
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout release-floater.
pub type Result<T> = EyreResult<T>;
