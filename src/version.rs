//! Library version tokens.
//!
//! Versions are compared with semantic-version precedence, so a pre-release
//! such as `0.8.0-dev` still sorts before the `0.8.0` release it leads up to.

use semver::Version;
use serde::Serialize;

use crate::AcousticResult;

/// Version of this build, taken from the package manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A release number baked into a deprecation record.
///
/// Kept as a plain triple so records can live in `static` tables; converted to
/// a [`semver::Version`] whenever it is compared against a running version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Release {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl Release {
    /// Create a release triple.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The release as a semantic version.
    pub fn to_version(self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }
}

impl std::fmt::Display for Release {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse the version of this build.
pub fn current() -> AcousticResult<Version> {
    parse(VERSION)
}

/// Parse a version string, tolerating surrounding whitespace and a leading `v`.
pub fn parse(version: &str) -> AcousticResult<Version> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Ok(Version::parse(trimmed)?)
}

/// True when `running` is at or past `release`.
pub fn reached(running: &Version, release: Release) -> bool {
    *running >= release.to_version()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_parses() {
        let version = current().unwrap();
        assert_eq!(version.to_string(), VERSION);
    }

    #[test]
    fn test_parse_accepts_prefix() {
        assert_eq!(parse("v0.8.0").unwrap(), Version::new(0, 8, 0));
        assert_eq!(parse(" 1.2.3 ").unwrap(), Version::new(1, 2, 3));
        assert!(parse("0.8").is_err());
    }

    #[test]
    fn test_reached_uses_semver_precedence() {
        let cutover = Release::new(0, 8, 0);
        assert!(!reached(&parse("0.7.9").unwrap(), cutover));
        assert!(!reached(&parse("0.8.0-dev").unwrap(), cutover));
        assert!(reached(&parse("0.8.0").unwrap(), cutover));
        assert!(reached(&parse("0.10.0").unwrap(), cutover));
        assert!(reached(&parse("1.0.0").unwrap(), cutover));
    }

    #[test]
    fn test_release_display() {
        assert_eq!(Release::new(0, 5, 0).to_string(), "0.5.0");
    }
}
