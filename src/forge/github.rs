//! Implements the ReleaseHost trait for the GitHub REST API
use async_trait::async_trait;
use color_eyre::eyre::eyre;
use futures_util::StreamExt;
use log::*;
use octocrab::{Octocrab, models::repos::Release};
use reqwest::StatusCode;
use std::path::Path;
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    Result,
    error::FloaterError,
    forge::{
        config::RemoteConfig,
        request::{CreateReleaseRequest, UploadAssetRequest},
        traits::ReleaseHost,
    },
};

/// GitHub backend using Octocrab for release and asset API calls.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())?
            .build()?;

        Ok(Self { config, instance })
    }

    /// Fetch a release by tag, mapping 404 to `None`.
    async fn get_release(&self, tag: &str) -> Result<Option<Release>> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .get_by_tag(tag)
            .await;

        match result {
            Ok(release) => Ok(Some(release)),
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                debug!("no release found for tag: {tag}");
                Ok(None)
            }
            Err(err) => {
                let msg =
                    format!("encountered error getting release {tag}: {err}");
                error!("{msg}");
                Err(eyre!(msg))
            }
        }
    }

    async fn require_release(&self, tag: &str) -> Result<Release> {
        self.get_release(tag).await?.ok_or_else(|| {
            FloaterError::host(format!(
                "release {tag} not found in {}/{}",
                self.config.owner, self.config.repo
            ))
            .into()
        })
    }
}

/// Id of the asset an upload of `name` has to delete first. GitHub rejects
/// uploads whose name is already taken on the release.
fn asset_to_replace(
    existing: &[(u64, &str)],
    name: &str,
    tag: &str,
    overwrite: bool,
) -> Result<Option<u64>> {
    let Some((id, _)) = existing.iter().find(|(_, n)| *n == name) else {
        return Ok(None);
    };

    if !overwrite {
        return Err(FloaterError::host(format!(
            "asset {name} already exists on release {tag}"
        ))
        .into());
    }

    Ok(Some(*id))
}

#[async_trait]
impl ReleaseHost for Github {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn download_assets(&self, tag: &str, dir: &Path) -> Result<()> {
        let release = self.require_release(tag).await?;

        for asset in release.assets {
            let target = dir.join(&asset.name);

            debug!("downloading asset {} to {}", asset.name, target.display());

            let stream = self
                .instance
                .repos(&self.config.owner, &self.config.repo)
                .release_assets()
                .stream(asset.id.into_inner())
                .await?;
            let mut stream = Box::pin(stream);

            let mut file = fs::File::create(&target).await?;

            while let Some(chunk) = stream.next().await {
                file.write_all(&chunk?).await?;
            }

            file.flush().await?;

            info!("downloaded asset {} from {tag}", asset.name);
        }

        Ok(())
    }

    async fn release_exists(&self, tag: &str) -> Result<bool> {
        Ok(self.get_release(tag).await?.is_some())
    }

    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()> {
        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag)
            .name(&req.title)
            .body(&req.notes)
            .draft(false)
            .prerelease(false)
            .send()
            .await?;

        Ok(())
    }

    async fn upload_asset(&self, req: UploadAssetRequest) -> Result<()> {
        let release = self.require_release(&req.tag).await?;
        let name = req.asset_name()?;

        let existing = release
            .assets
            .iter()
            .map(|a| (a.id.into_inner(), a.name.as_str()))
            .collect::<Vec<(u64, &str)>>();

        if let Some(asset_id) =
            asset_to_replace(&existing, &name, &req.tag, req.overwrite)?
        {
            info!("replacing existing asset {name} on {}", req.tag);

            self.instance
                .repos(&self.config.owner, &self.config.repo)
                .release_assets()
                .delete(asset_id)
                .await?;
        }

        let contents = fs::read(&req.path).await?;

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .upload_asset(release.id.into_inner(), &name, contents.into())
            .send()
            .await?;

        Ok(())
    }
}
