//! Common test helpers shared across test modules.
//!
//! [`FakeHost`] keeps releases in memory so whole propagation runs can be
//! checked against the resulting release state, where a mock would only
//! check individual calls.
use async_trait::async_trait;
use color_eyre::eyre::eyre;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::{
    Result,
    forge::{
        request::{CreateReleaseRequest, UploadAssetRequest},
        traits::ReleaseHost,
    },
};

/// A release held by [`FakeHost`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeRelease {
    pub title: String,
    pub notes: String,
    pub assets: BTreeMap<String, Vec<u8>>,
}

#[derive(Debug, Default)]
struct FakeState {
    releases: BTreeMap<String, FakeRelease>,
    calls: Vec<String>,
    failing_upload_tag: Option<String>,
    download_dir: Option<PathBuf>,
}

/// In-memory release host. Clones share state, so a test can hand one clone
/// to a `ReleaseManager` and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    state: Arc<Mutex<FakeState>>,
}

impl FakeHost {
    /// Adds a release titled after its tag with notes "existing notes".
    pub fn with_release(self, tag: &str, assets: &[(&str, &str)]) -> Self {
        let release = FakeRelease {
            title: tag.to_string(),
            notes: "existing notes".to_string(),
            assets: assets
                .iter()
                .map(|(name, content)| {
                    (name.to_string(), content.as_bytes().to_vec())
                })
                .collect(),
        };

        self.state
            .lock()
            .unwrap()
            .releases
            .insert(tag.to_string(), release);

        self
    }

    /// Makes every upload to `tag` fail.
    pub fn fail_uploads_to(self, tag: &str) -> Self {
        self.state.lock().unwrap().failing_upload_tag = Some(tag.to_string());
        self
    }

    pub fn release(&self, tag: &str) -> Option<FakeRelease> {
        self.state.lock().unwrap().releases.get(tag).cloned()
    }

    /// Calls received so far, e.g. "exists 1.x.x" or "upload 1.x.x app".
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Directory the last download wrote into.
    pub fn download_dir(&self) -> Option<PathBuf> {
        self.state.lock().unwrap().download_dir.clone()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl ReleaseHost for FakeHost {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn download_assets(&self, tag: &str, dir: &Path) -> Result<()> {
        self.record(format!("download {tag}"));

        let release = self
            .release(tag)
            .ok_or_else(|| eyre!("release {tag} not found"))?;

        self.state.lock().unwrap().download_dir = Some(dir.to_path_buf());

        for (name, content) in release.assets.iter() {
            fs::write(dir.join(name), content)?;
        }

        Ok(())
    }

    async fn release_exists(&self, tag: &str) -> Result<bool> {
        self.record(format!("exists {tag}"));
        Ok(self.release(tag).is_some())
    }

    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()> {
        self.record(format!("create {}", req.tag));

        let mut state = self.state.lock().unwrap();

        if state.releases.contains_key(&req.tag) {
            return Err(eyre!("release {} already exists", req.tag));
        }

        state.releases.insert(
            req.tag,
            FakeRelease {
                title: req.title,
                notes: req.notes,
                assets: BTreeMap::new(),
            },
        );

        Ok(())
    }

    async fn upload_asset(&self, req: UploadAssetRequest) -> Result<()> {
        let name = req.asset_name()?;

        self.record(format!("upload {} {name}", req.tag));

        let content = fs::read(&req.path)?;
        let mut state = self.state.lock().unwrap();

        if state.failing_upload_tag.as_deref() == Some(req.tag.as_str()) {
            return Err(eyre!("upload of {name} to {} rejected", req.tag));
        }

        let release = state
            .releases
            .get_mut(&req.tag)
            .ok_or_else(|| eyre!("release {} not found", req.tag))?;

        if release.assets.contains_key(&name) && !req.overwrite {
            return Err(eyre!("asset {name} already exists on {}", req.tag));
        }

        release.assets.insert(name, content);

        Ok(())
    }
}
