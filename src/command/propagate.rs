//! Propagates a tagged release's assets to its floating releases.
use color_eyre::eyre::Context;
use log::*;

use crate::{
    Result,
    assets::AssetCache,
    forge::manager::ReleaseManager,
    publish::{self, PublishOutcome},
    version::{FloatingTargets, SourceRelease},
};

/// Input for a propagation run.
#[derive(Debug, Clone, Default)]
pub struct PropagateRequest {
    /// Reference naming the source release (e.g. "refs/tags/v1.2.3").
    pub reference: String,
    /// Notes for floating releases created during the run. Generated per
    /// target when unset.
    pub notes: Option<String>,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct PropagationReport {
    pub source: SourceRelease,
    pub targets: Vec<PublishOutcome>,
}

/// Execute the propagation: parse, fetch, then publish major and minor.
pub async fn execute(
    manager: &ReleaseManager,
    req: PropagateRequest,
) -> Result<PropagationReport> {
    let source = SourceRelease::from_reference(&req.reference)?;
    let targets = FloatingTargets::from_version(&source.version);

    info!(
        "propagating assets of {} to {} and {}",
        source.tag, targets.major, targets.minor
    );

    let cache = AssetCache::new()?;
    let files = cache.fetch(manager, &source.tag).await?;

    if files.is_empty() {
        warn!("release {} has no assets to propagate", source.tag);
    }

    let mut outcomes = vec![];

    for target in targets.iter() {
        let notes = req
            .notes
            .clone()
            .unwrap_or_else(|| publish::default_notes(target));

        let outcome = publish::publish(manager, target, &files, &notes)
            .await
            .wrap_err_with(|| format!("failed to publish {target}"))?;

        outcomes.push(outcome);
    }

    if let Err(err) = cache.close() {
        warn!("{err:#}");
    }

    Ok(PropagationReport {
        source,
        targets: outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FloaterError,
        forge::{config::HostOptions, traits::MockReleaseHost},
        publish::ReleaseState,
        test_helpers::FakeHost,
    };

    fn request(reference: &str) -> PropagateRequest {
        PropagateRequest {
            reference: reference.to_string(),
            notes: None,
        }
    }

    fn manager(host: FakeHost) -> ReleaseManager {
        ReleaseManager::new(Box::new(host), HostOptions::default())
    }

    #[test_log::test(tokio::test)]
    async fn mirrors_assets_to_new_floating_releases() {
        let host = FakeHost::default().with_release(
            "v2.5.1",
            &[("app-linux", "linux-bytes"), ("app-darwin", "darwin-bytes")],
        );

        let report =
            execute(&manager(host.clone()), request("refs/tags/v2.5.1"))
                .await
                .unwrap();

        assert_eq!(report.source.tag, "v2.5.1");
        assert_eq!(report.targets.len(), 2);
        assert_eq!(report.targets[0].target, "2.x.x");
        assert_eq!(report.targets[1].target, "2.5.x");
        assert!(
            report
                .targets
                .iter()
                .all(|t| t.state == ReleaseState::Created)
        );

        let source = host.release("v2.5.1").unwrap();

        for tag in ["2.x.x", "2.5.x"] {
            let release = host.release(tag).unwrap();
            assert_eq!(release.title, tag);
            assert_eq!(release.assets, source.assets);
        }
    }

    #[tokio::test]
    async fn keeps_unrelated_assets_and_metadata() {
        let host = FakeHost::default()
            .with_release("v2.5.1", &[("app-linux", "new-linux")])
            .with_release("2.x.x", &[("old-tool", "old"), ("app-linux", "x")]);

        let report = execute(&manager(host.clone()), request("v2.5.1"))
            .await
            .unwrap();

        assert_eq!(report.targets[0].state, ReleaseState::Existing);
        assert_eq!(report.targets[1].state, ReleaseState::Created);

        let major = host.release("2.x.x").unwrap();
        assert_eq!(major.notes, "existing notes");
        assert_eq!(major.assets["old-tool"], b"old".to_vec());
        assert_eq!(major.assets["app-linux"], b"new-linux".to_vec());
    }

    #[tokio::test]
    async fn running_twice_is_idempotent() {
        let host = FakeHost::default().with_release(
            "v1.4.0",
            &[("app-linux", "linux"), ("app-darwin", "darwin")],
        );
        let manager = manager(host.clone());

        execute(&manager, request("v1.4.0")).await.unwrap();
        let major_once = host.release("1.x.x").unwrap();
        let minor_once = host.release("1.4.x").unwrap();

        let report = execute(&manager, request("v1.4.0")).await.unwrap();

        assert!(
            report
                .targets
                .iter()
                .all(|t| t.state == ReleaseState::Existing)
        );
        assert_eq!(host.release("1.x.x").unwrap(), major_once);
        assert_eq!(host.release("1.4.x").unwrap(), minor_once);
    }

    #[tokio::test]
    async fn publishes_major_before_minor() {
        let host = FakeHost::default().with_release("v3.1.4", &[("a", "a")]);

        execute(&manager(host.clone()), request("v3.1.4"))
            .await
            .unwrap();

        assert_eq!(
            host.calls(),
            vec![
                "download v3.1.4",
                "exists 3.x.x",
                "create 3.x.x",
                "upload 3.x.x a",
                "exists 3.1.x",
                "create 3.1.x",
                "upload 3.1.x a",
            ]
        );
    }

    #[tokio::test]
    async fn uses_custom_notes_for_created_releases() {
        let host = FakeHost::default().with_release("v1.0.0", &[]);

        execute(
            &manager(host.clone()),
            PropagateRequest {
                reference: "v1.0.0".into(),
                notes: Some("custom".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(host.release("1.x.x").unwrap().notes, "custom");
        assert_eq!(host.release("1.0.x").unwrap().notes, "custom");
    }

    #[tokio::test]
    async fn malformed_tags_make_no_host_calls() {
        for reference in [
            "1.2",
            "a.b.c",
            "",
            "1.2.3.4",
            "1.2.3-rc1",
            "refs/tags/v1.2",
        ] {
            // any call on a mock without expectations panics
            let mock_host = MockReleaseHost::new();
            let manager = ReleaseManager::new(
                Box::new(mock_host),
                HostOptions::default(),
            );

            let err = execute(&manager, request(reference)).await.unwrap_err();

            assert!(matches!(
                err.downcast_ref::<FloaterError>(),
                Some(FloaterError::InvalidTag { .. })
            ));
        }
    }

    #[tokio::test]
    async fn missing_source_release_is_fatal() {
        let host = FakeHost::default();

        let result = execute(&manager(host.clone()), request("v1.2.3")).await;

        assert!(result.is_err());
        assert!(host.release("1.x.x").is_none());
        assert!(host.release("1.2.x").is_none());
    }

    #[tokio::test]
    async fn major_failure_skips_minor() {
        let host = FakeHost::default()
            .with_release("v1.2.3", &[("app", "app")])
            .fail_uploads_to("1.x.x");

        let err = execute(&manager(host.clone()), request("v1.2.3"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("1.x.x"));
        assert!(host.release("1.2.x").is_none());
        assert!(!host.calls().iter().any(|c| c.contains("1.2.x")));
    }

    #[tokio::test]
    async fn removes_asset_cache_on_success() {
        let host = FakeHost::default().with_release("v1.2.3", &[("app", "1")]);

        execute(&manager(host.clone()), request("v1.2.3"))
            .await
            .unwrap();

        let dir = host.download_dir().unwrap();
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn removes_asset_cache_on_failure() {
        let host = FakeHost::default()
            .with_release("v1.2.3", &[("app", "1")])
            .fail_uploads_to("1.2.x");

        let result = execute(&manager(host.clone()), request("v1.2.3")).await;

        assert!(result.is_err());
        let dir = host.download_dir().unwrap();
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn dry_run_leaves_host_untouched() {
        let host = FakeHost::default().with_release("v1.2.3", &[("app", "1")]);
        let manager = ReleaseManager::new(
            Box::new(host.clone()),
            HostOptions { dry_run: true },
        );

        let report = execute(&manager, request("v1.2.3")).await.unwrap();

        assert_eq!(report.targets[0].uploaded, 1);
        assert!(host.release("1.x.x").is_none());
        assert!(
            !host
                .calls()
                .iter()
                .any(|c| c.starts_with("create") || c.starts_with("upload"))
        );
    }
}
