//! Traits related to release hosting services
use async_trait::async_trait;
use std::path::Path;

use crate::{
    Result,
    forge::request::{CreateReleaseRequest, UploadAssetRequest},
};

/// Operations release-floater needs from the service hosting releases, all
/// keyed by tag.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseHost: Send + Sync {
    /// Backend name used in log output.
    fn name(&self) -> &'static str;
    /// Download every asset of the release into `dir`, one file per asset
    /// named after it. Fails when the release does not exist.
    async fn download_assets(&self, tag: &str, dir: &Path) -> Result<()>;
    async fn release_exists(&self, tag: &str) -> Result<bool>;
    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()>;
    async fn upload_asset(&self, req: UploadAssetRequest) -> Result<()>;
}
