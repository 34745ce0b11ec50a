//! Scoped local copy of the source release's assets.
use color_eyre::eyre::Context;
use log::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use crate::{Result, forge::manager::ReleaseManager};

const CACHE_PREFIX: &str = "release-floater-";

/// Temporary directory holding downloaded assets for one run. The directory
/// and everything in it is removed when the cache is dropped.
#[derive(Debug)]
pub struct AssetCache {
    dir: TempDir,
}

impl AssetCache {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(CACHE_PREFIX)
            .tempdir()
            .wrap_err("failed to create temporary asset directory")?;

        debug!("created asset cache at {}", dir.path().display());

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Download every asset of `tag` into the cache and return the files.
    pub async fn fetch(
        &self,
        manager: &ReleaseManager,
        tag: &str,
    ) -> Result<Vec<PathBuf>> {
        manager
            .download_assets(tag, self.path())
            .await
            .wrap_err_with(|| {
                format!("failed to download assets of release {tag}")
            })?;

        let files = self.files().await?;

        for file in files.iter() {
            debug!("cached asset: {}", file.display());
        }

        info!("fetched {} asset(s) from release {tag}", files.len());

        Ok(files)
    }

    /// Regular files in the cache sorted by name. Directories, symlinks and
    /// other entries are skipped.
    pub async fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = vec![];
        let mut entries = fs::read_dir(self.path()).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                files.push(entry.path());
            } else {
                debug!("skipping non-file entry: {}", entry.path().display());
            }
        }

        files.sort();

        Ok(files)
    }

    /// Remove the cache now, reporting removal failures instead of ignoring
    /// them on drop.
    pub fn close(self) -> Result<()> {
        let path = self.path().to_path_buf();

        self.dir.close().wrap_err_with(|| {
            format!("failed to remove asset cache {}", path.display())
        })?;

        debug!("removed asset cache {}", path.display());

        Ok(())
    }
}
