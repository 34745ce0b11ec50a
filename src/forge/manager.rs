//! Manager that wraps release host implementations
use log::*;
use std::path::Path;

use crate::{
    Result,
    forge::{
        config::HostOptions,
        request::{CreateReleaseRequest, UploadAssetRequest},
        traits::ReleaseHost,
    },
};

pub struct ReleaseManager {
    host: Box<dyn ReleaseHost>,
    options: HostOptions,
}

impl ReleaseManager {
    pub fn new(host: Box<dyn ReleaseHost>, options: HostOptions) -> Self {
        Self { host, options }
    }

    pub fn host_name(&self) -> &'static str {
        self.host.name()
    }

    pub fn dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Downloads run even in dry-run mode; they only touch the local cache.
    pub async fn download_assets(&self, tag: &str, dir: &Path) -> Result<()> {
        debug!("downloading assets of {tag} to {}", dir.display());
        self.host.download_assets(tag, dir).await
    }

    pub async fn release_exists(&self, tag: &str) -> Result<bool> {
        debug!("looking up release {tag}");
        self.host.release_exists(tag).await
    }

    pub async fn create_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<()> {
        if self.options.dry_run {
            warn!("dry_run: would create release: req: {:#?}", req);
            return Ok(());
        }

        self.host.create_release(req).await
    }

    pub async fn upload_asset(&self, req: UploadAssetRequest) -> Result<()> {
        if self.options.dry_run {
            warn!("dry_run: would upload asset: req: {:#?}", req);
            return Ok(());
        }

        self.host.upload_asset(req).await
    }
}
