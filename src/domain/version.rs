use crate::domain::bumper::VersionBump;
use crate::error::{NextverError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const VERSION_PATTERN: &str = r"^v?([0-9]+)\.([0-9]+)\.([0-9]+)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("hard-coded version pattern is valid"))
}

/// Semantic version representation.
///
/// Immutable: every bump operation returns a new value. The empty string
/// in `pre_release` or `build_metadata` means the component is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: String,
    pub build_metadata: String,
}

impl Version {
    /// Create a new release version (no pre-release, no build metadata)
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release: String::new(),
            build_metadata: String::new(),
        }
    }

    /// Parse a version from a tag name (e.g., "v1.2.3-alpha.1+build.5").
    ///
    /// The leading `v` is optional. An empty string parses to the zero
    /// version `0.0.0`, which is the baseline for untagged repositories.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Version::default());
        }

        let caps = version_regex()
            .captures(text)
            .ok_or_else(|| NextverError::not_semver(text))?;

        let number = |i: usize| -> Result<u64> {
            caps[i]
                .parse::<u64>()
                .map_err(|_| NextverError::not_semver(text))
        };

        Ok(Version {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            pre_release: caps.get(4).map(|m| m.as_str().to_string()).unwrap_or_default(),
            build_metadata: caps.get(5).map(|m| m.as_str().to_string()).unwrap_or_default(),
        })
    }

    /// Bump the major number.
    ///
    /// Per https://semver.org/#spec-item-11 a pre-release sorts before its
    /// associated release, so bumping major on a `X.0.0-...` pre-release
    /// only promotes it to the release `X.0.0` without incrementing.
    pub fn bump_major(&self) -> Version {
        let mut next = self.release();
        if self.pre_release.is_empty() || self.minor != 0 || self.patch != 0 {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
        }
        next
    }

    /// Bump the minor number.
    ///
    /// A `X.Y.0-...` pre-release is promoted to `X.Y.0` without incrementing.
    pub fn bump_minor(&self) -> Version {
        let mut next = self.release();
        if self.pre_release.is_empty() || self.patch != 0 {
            next.minor += 1;
            next.patch = 0;
        }
        next
    }

    /// Bump the patch number.
    ///
    /// Any pre-release is promoted to its release without incrementing.
    pub fn bump_patch(&self) -> Version {
        let mut next = self.release();
        if self.pre_release.is_empty() {
            next.patch += 1;
        }
        next
    }

    /// Bump or initialize the pre-release identifiers.
    ///
    /// With empty `identifiers` this is the identity. If the version is not
    /// yet a pre-release, `fallback` decides how the numeric triple moves
    /// first (callers conventionally pass [VersionBump::Minor]). With
    /// `overwrite` the identifiers are set verbatim; otherwise a numeric
    /// index is appended, continuing from the current pre-release when it
    /// carries the same identifiers (`1.1.0-alpha.0` + `alpha` gives
    /// `1.1.0-alpha.1`) and starting at `.0` otherwise.
    pub fn bump_pre_release(
        &self,
        identifiers: &str,
        overwrite: bool,
        fallback: VersionBump,
    ) -> Version {
        if identifiers.is_empty() {
            return self.clone();
        }

        let mut next = if self.is_pre_release() {
            self.clone()
        } else {
            fallback.apply(self)
        };

        if overwrite {
            next.pre_release = identifiers.to_string();
            return next;
        }

        if self.has_same_pre_release_identifier_prefix(identifiers) {
            let current_index = self
                .pre_release
                .rsplit('.')
                .next()
                .and_then(|last| last.parse::<u64>().ok())
                .unwrap_or(0);
            next.pre_release = format!("{}.{}", identifiers, current_index + 1);
            return next;
        }

        next.pre_release = format!("{}.0", identifiers);
        next
    }

    /// Return this version with the build metadata replaced.
    ///
    /// Never touches the numbers or the pre-release identifiers.
    pub fn with_build_metadata(&self, metadata: impl Into<String>) -> Version {
        let mut next = self.clone();
        next.build_metadata = metadata.into();
        next
    }

    /// True for initial-development versions (major == 0)
    pub fn is_unstable(&self) -> bool {
        self.major == 0
    }

    /// True if the version carries pre-release identifiers
    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }

    /// True if this version's pre-release identifiers equal `identifiers`,
    /// either exactly or once a trailing numeric index is stripped.
    ///
    /// `1.1.0-alpha.0` and `1.1.0-alpha` both share the prefix `alpha`;
    /// `1.1.0-alpha.beta` does not.
    pub fn has_same_pre_release_identifier_prefix(&self, identifiers: &str) -> bool {
        if !self.is_pre_release() || identifiers.is_empty() {
            return false;
        }

        let current: Vec<&str> = self.pre_release.split('.').collect();
        let desired: Vec<&str> = identifiers.split('.').collect();

        if current == desired {
            return true;
        }
        match current.split_last() {
            Some((last, rest)) => last.parse::<u64>().is_ok() && rest == desired.as_slice(),
            None => false,
        }
    }

    /// The plain release for this triple: pre-release and build metadata
    /// cleared, numbers untouched.
    fn release(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_versions() {
        let cases = vec![
            "1.2.3",
            "v1.2.3",
            "1.2.0-x.Y.0+metadata",
            "v1.2.0-x.Y.0+metadata",
            "1.2.0-x.Y.0+metadata-width-hypen",
            "1.2.3-rc1-with-hypen",
            "v1.2.3-rc1-with-hypen",
            "1.2.2147483648",
            "1.2147483648.3",
            "2147483648.3.0",
        ];
        for case in cases {
            assert!(Version::parse(case).is_ok(), "should parse: {}", case);
        }
    }

    #[test]
    fn test_parse_invalid_versions() {
        let cases = vec![
            "1.0", "v1.0", "1", "v1", "1.2.beta", "v1.2.beta", "foo", "1.2-5", "v1.2-5",
            "1.2-beta.5", "v1.2-beta.5", "\n1.2", "\nv1.2", "1.2.3.4", "v1.2.3.4", "V1.2.3",
        ];
        for case in cases {
            assert!(Version::parse(case).is_err(), "should reject: {}", case);
        }
    }

    #[test]
    fn test_parse_empty_is_zero_version() {
        let v = Version::parse("").unwrap();
        assert_eq!(v, Version::new(0, 0, 0));
    }

    #[test]
    fn test_parse_components() {
        let v = Version::parse("v1.2.3-alpha.1+build.5").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
        assert_eq!(v.pre_release, "alpha.1");
        assert_eq!(v.build_metadata, "build.5");
    }

    #[test]
    fn test_display_round_trip_strips_v_prefix() {
        let cases = vec![
            ("1.2.3", "1.2.3"),
            ("v1.2.3", "1.2.3"),
            ("v1.2.0-alpha.1", "1.2.0-alpha.1"),
            ("1.2.0-alpha.1+build.5", "1.2.0-alpha.1+build.5"),
        ];
        for (input, expected) in cases {
            assert_eq!(Version::parse(input).unwrap().to_string(), expected);
        }
    }

    #[test]
    fn test_bump_major() {
        let cases = vec![
            ("0.1.0", "1.0.0"),
            ("v1.0.0-alpha.0", "1.0.0"),
            ("1.1.0-alpha.0", "2.0.0"),
            ("v1.1.1-alpha.0", "2.0.0"),
            ("v1.0.1-alpha.0", "2.0.0"),
        ];
        for (input, expected) in cases {
            let bumped = Version::parse(input).unwrap().bump_major();
            assert_eq!(bumped.to_string(), expected, "bump_major({})", input);
        }
    }

    #[test]
    fn test_bump_minor() {
        let cases = vec![
            ("0.1.0", "0.2.0"),
            ("1.0.1", "1.1.0"),
            ("v1.1.0-alpha.2", "1.1.0"),
            ("v1.0.1-alpha.2", "1.1.0"),
            ("1.1.1-alpha.2", "1.2.0"),
        ];
        for (input, expected) in cases {
            let bumped = Version::parse(input).unwrap().bump_minor();
            assert_eq!(bumped.to_string(), expected, "bump_minor({})", input);
        }
    }

    #[test]
    fn test_bump_patch() {
        let cases = vec![("0.1.0", "0.1.1"), ("0.1.0-alpha.0", "0.1.0")];
        for (input, expected) in cases {
            let bumped = Version::parse(input).unwrap().bump_patch();
            assert_eq!(bumped.to_string(), expected, "bump_patch({})", input);
        }
    }

    #[test]
    fn test_bump_clears_build_metadata() {
        let v = Version::parse("1.2.3+build.9").unwrap();
        assert_eq!(v.bump_patch().to_string(), "1.2.4");
        assert_eq!(v.bump_minor().to_string(), "1.3.0");
        assert_eq!(v.bump_major().to_string(), "2.0.0");
    }

    #[test]
    fn test_bump_pre_release() {
        let cases = vec![
            ("1.0.0", "", false, "1.0.0"),
            ("1.0.0", "alpha", false, "1.1.0-alpha.0"),
            ("1.1.0-alpha.0", "alpha", false, "1.1.0-alpha.1"),
            ("1.1.0-alpha.1", "beta", false, "1.1.0-beta.0"),
            ("1.0.0", "", true, "1.0.0"),
            ("1.0.0", "SNAPSHOT", true, "1.1.0-SNAPSHOT"),
            ("1.1.0-SNAPSHOT", "SNAPSHOT", true, "1.1.0-SNAPSHOT"),
            ("1.1.0-alpha", "alpha", false, "1.1.0-alpha.1"),
            ("1.1.0-alpha.beta", "alpha.beta", false, "1.1.0-alpha.beta.1"),
        ];
        for (input, identifiers, overwrite, expected) in cases {
            let v = Version::parse(input).unwrap();
            let bumped = v.bump_pre_release(identifiers, overwrite, VersionBump::Minor);
            assert_eq!(
                bumped.to_string(),
                expected,
                "bump_pre_release({}, {:?}, {})",
                input,
                identifiers,
                overwrite
            );
        }
    }

    #[test]
    fn test_bump_pre_release_with_major_fallback() {
        let v = Version::new(1, 0, 0);
        let v2 = v.bump_pre_release("alpha", false, VersionBump::Major);
        assert_eq!(v2.to_string(), "2.0.0-alpha.0");
        // once it is a pre-release the fallback no longer applies
        let v3 = v2.bump_pre_release("alpha", false, VersionBump::Major);
        assert_eq!(v3.to_string(), "2.0.0-alpha.1");
    }

    #[test]
    fn test_with_build_metadata() {
        let cases = vec![
            ("1.0.0", "build.8", "1.0.0+build.8"),
            ("1.0.0", "3.abcdkd", "1.0.0+3.abcdkd"),
            ("1.1.0-alpha.0", "1.1234567", "1.1.0-alpha.0+1.1234567"),
        ];
        for (input, metadata, expected) in cases {
            let v = Version::parse(input).unwrap();
            assert_eq!(v.with_build_metadata(metadata).to_string(), expected);
        }
    }

    #[test]
    fn test_with_build_metadata_replaces() {
        let v = Version::new(1, 0, 0)
            .with_build_metadata("first")
            .with_build_metadata("second");
        assert_eq!(v.to_string(), "1.0.0+second");
    }

    #[test]
    fn test_is_unstable() {
        assert!(Version::new(0, 9, 3).is_unstable());
        assert!(!Version::new(1, 0, 0).is_unstable());
    }

    #[test]
    fn test_is_pre_release() {
        assert!(Version::parse("1.0.0-alpha").unwrap().is_pre_release());
        assert!(!Version::new(1, 0, 0).is_pre_release());
    }

    #[test]
    fn test_has_same_pre_release_identifier_prefix() {
        let cases = vec![
            ("1.1.0-alpha.0", "alpha", true),
            ("1.1.0-alpha", "alpha", true),
            ("1.1.0-alpha.1.2", "alpha.1", true),
            ("1.1.0-alpha.beta", "alpha", false),
            ("1.1.0-beta.0", "alpha", false),
            ("1.1.0", "alpha", false),
            ("1.1.0-alpha.0", "", false),
        ];
        for (input, identifiers, expected) in cases {
            let v = Version::parse(input).unwrap();
            assert_eq!(
                v.has_same_pre_release_identifier_prefix(identifiers),
                expected,
                "{} vs {}",
                input,
                identifiers
            );
        }
    }

    #[test]
    fn test_canonical_output_is_strict_semver() {
        let cases = vec!["1.2.3", "v1.2.3", "1.2.0-alpha.1", "1.2.0-rc.1+build.42"];
        for case in cases {
            let rendered = Version::parse(case).unwrap().to_string();
            assert!(
                semver::Version::parse(&rendered).is_ok(),
                "not strict semver: {}",
                rendered
            );
        }
    }
}
