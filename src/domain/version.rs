use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static RELEASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("release pattern is valid")
});

static PR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v([0-9]+)\.([0-9]+)\.([0-9]+)-PR-([0-9]+)\.([0-9]+)$")
        .expect("pr pattern is valid")
});

/// Release version `v<major>.<minor>.<patch>`
///
/// Ordering is lexicographic over (major, minor, patch). "No version" is
/// expressed as `Option<ReleaseVersion>`; `None` sorts below every release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ReleaseVersion {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        ReleaseVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse a full-string release tag (e.g., "v1.2.3" -> ReleaseVersion(1,2,3))
    ///
    /// Anything else, including a missing `v`, surrounding whitespace or an
    /// integer that does not fit in `u32`, is not a match.
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = RELEASE_PATTERN.captures(tag)?;
        Some(ReleaseVersion {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps[3].parse().ok()?,
        })
    }

    /// The same version with the patch component incremented, if it fits
    pub fn next_patch(&self) -> Option<Self> {
        Some(ReleaseVersion {
            patch: self.patch.checked_add(1)?,
            ..*self
        })
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Pull-request pre-release version `v<major>.<minor>.<patch>-PR-<pr>.<sub>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrVersion {
    pub release: ReleaseVersion,
    pub pr: u32,
    pub sub: u32,
}

impl PrVersion {
    /// Create a new PR version on top of `release`
    pub fn new(release: ReleaseVersion, pr: u32, sub: u32) -> Self {
        PrVersion { release, pr, sub }
    }

    /// Parse a full-string PR tag (e.g., "v1.0.0-PR-7.3")
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = PR_PATTERN.captures(tag)?;
        Some(PrVersion {
            release: ReleaseVersion {
                major: caps[1].parse().ok()?,
                minor: caps[2].parse().ok()?,
                patch: caps[3].parse().ok()?,
            },
            pr: caps[4].parse().ok()?,
            sub: caps[5].parse().ok()?,
        })
    }
}

impl fmt::Display for PrVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-PR-{}.{}", self.release, self.pr, self.sub)
    }
}

/// Parse a release tag; `None` when the string does not match.
pub fn parse_release(tag: &str) -> Option<ReleaseVersion> {
    ReleaseVersion::parse(tag)
}

/// Parse a PR tag; `None` when the string does not match.
pub fn parse_pr(tag: &str) -> Option<PrVersion> {
    PrVersion::parse(tag)
}
