//! Resolves the source release tag and the floating releases it feeds.
use log::*;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

use crate::{Result, error::FloaterError};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(?<major>[0-9]+)\.(?<minor>[0-9]+)\.(?<patch>[0-9]+)$")
        .unwrap()
});

/// Release whose assets get propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRelease {
    /// Tag exactly as it appears on the release host (e.g. "v1.2.3").
    pub tag: String,
    /// Parsed major, minor and patch.
    pub version: Version,
}

impl SourceRelease {
    /// Resolve the tag named by a reference such as `refs/tags/v1.2.3` and
    /// parse its version.
    pub fn from_reference(reference: &str) -> Result<Self> {
        let tag = resolve_tag(reference)?;
        let version = parse_version(&tag)?;

        info!("resolved release {tag} as version {version}");

        Ok(Self { tag, version })
    }
}

/// Returns the last `/`-delimited segment of a reference.
pub fn resolve_tag(reference: &str) -> Result<String> {
    let tag = reference.rsplit('/').next().unwrap_or(reference);

    if tag.is_empty() {
        return Err(
            FloaterError::invalid_tag(reference, "reference names no tag")
                .into(),
        );
    }

    Ok(tag.to_string())
}

/// Parses `[v]<major>.<minor>.<patch>`. Pre-release and build suffixes are
/// rejected.
pub fn parse_version(tag: &str) -> Result<Version> {
    let captures = VERSION_REGEX.captures(tag).ok_or_else(|| {
        FloaterError::invalid_tag(
            tag,
            "expected <major>.<minor>.<patch> with an optional leading 'v'",
        )
    })?;

    let major = parse_component(tag, "major", &captures["major"])?;
    let minor = parse_component(tag, "minor", &captures["minor"])?;
    let patch = parse_component(tag, "patch", &captures["patch"])?;

    Ok(Version::new(major, minor, patch))
}

fn parse_component(tag: &str, name: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|err| {
        FloaterError::invalid_tag(tag, format!("{name} version {value}: {err}"))
            .into()
    })
}

/// The two floating releases fed by a source release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingTargets {
    /// `{major}.x.x`
    pub major: String,
    /// `{major}.{minor}.x`
    pub minor: String,
}

impl FloatingTargets {
    pub fn from_version(version: &Version) -> Self {
        Self {
            major: format!("{}.x.x", version.major),
            minor: format!("{}.{}.x", version.major, version.minor),
        }
    }

    /// Targets in publishing order: major line first, then minor line.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.major.as_str(), self.minor.as_str()].into_iter()
    }
}
