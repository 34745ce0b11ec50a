//! Publishing cached assets to a floating release.
use color_eyre::eyre::Context;
use log::*;
use std::path::PathBuf;

use crate::{
    Result,
    forge::{
        manager::ReleaseManager,
        request::{CreateReleaseRequest, UploadAssetRequest},
    },
};

/// Whether the floating release had to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseState {
    Created,
    Existing,
}

/// Result of publishing to one floating release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub target: String,
    pub state: ReleaseState,
    /// Number of assets uploaded.
    pub uploaded: usize,
}

/// Notes used when a floating release is created.
pub fn default_notes(target: &str) -> String {
    format!(
        "Floating release tracking the latest {target} release. Its assets \
         are replaced each time a matching version is released."
    )
}

/// Ensure `target` exists, then upload every file to it with overwrite.
///
/// An existing release keeps its title and notes. Assets already on the
/// release that are not among `files` are left alone.
pub async fn publish(
    manager: &ReleaseManager,
    target: &str,
    files: &[PathBuf],
    notes: &str,
) -> Result<PublishOutcome> {
    let exists = manager
        .release_exists(target)
        .await
        .wrap_err_with(|| format!("failed to look up release {target}"))?;

    let state = if exists {
        info!("release {target} already exists");
        ReleaseState::Existing
    } else {
        info!("creating release {target}");

        manager
            .create_release(CreateReleaseRequest {
                tag: target.to_string(),
                title: target.to_string(),
                notes: notes.to_string(),
            })
            .await
            .wrap_err_with(|| format!("failed to create release {target}"))?;

        ReleaseState::Created
    };

    let mut uploaded = 0;

    for file in files.iter() {
        let req = UploadAssetRequest {
            tag: target.to_string(),
            path: file.clone(),
            overwrite: true,
        };
        let name = req.asset_name()?;

        manager.upload_asset(req).await.wrap_err_with(|| {
            format!("failed to upload {name} to release {target}")
        })?;

        info!("uploaded {name} to {target}");
        uploaded += 1;
    }

    Ok(PublishOutcome {
        target: target.to_string(),
        state,
        uploaded,
    })
}
