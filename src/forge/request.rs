use color_eyre::eyre::OptionExt;
use std::path::PathBuf;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a release for a tag that has none yet.
pub struct CreateReleaseRequest {
    pub tag: String,
    pub title: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to attach a local file to a release as an asset.
pub struct UploadAssetRequest {
    pub tag: String,
    /// Local file; its file name becomes the asset name.
    pub path: PathBuf,
    /// Replace a same-named asset instead of failing on the conflict.
    pub overwrite: bool,
}

impl UploadAssetRequest {
    /// Name the asset will carry on the release.
    pub fn asset_name(&self) -> Result<String> {
        let name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_eyre(format!(
                "unable to determine asset name for path: {}",
                self.path.display()
            ))?;

        Ok(name.to_string())
    }
}
