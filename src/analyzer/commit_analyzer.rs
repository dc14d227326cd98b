use regex::Regex;
use tracing::trace;

use crate::domain::{Commit, VersionBump};
use crate::error::{NextverError, Result};

/// Default pattern detecting a breaking change, either through a `!` marker
/// in the message header or a `BREAKING CHANGE:` footer line.
pub const DEFAULT_MAJOR_PATTERN: &str = r"(?:^.+!:.*$|(?m:^BREAKING CHANGE:.*$))";

/// Default pattern detecting a minor change from a conventional commit header.
pub const DEFAULT_MINOR_PATTERN: &str = r"^(?:feat|chore|build|ci|refactor|perf)(?:\(.+\))?:.*$";

/// Classifies commit messages into the version bump they call for
#[derive(Debug)]
pub struct CommitAnalyzer {
    major_pattern: Regex,
    minor_pattern: Regex,
}

impl CommitAnalyzer {
    /// Create an analyzer from pre-compiled patterns
    pub fn new(major_pattern: Regex, minor_pattern: Regex) -> Self {
        CommitAnalyzer {
            major_pattern,
            minor_pattern,
        }
    }

    /// Compile an analyzer from pattern strings
    pub fn from_patterns(major_pattern: &str, minor_pattern: &str) -> Result<Self> {
        let major = Regex::new(major_pattern)
            .map_err(|e| NextverError::config(format!("invalid major pattern: {}", e)))?;
        let minor = Regex::new(minor_pattern)
            .map_err(|e| NextverError::config(format!("invalid minor pattern: {}", e)))?;
        Ok(CommitAnalyzer::new(major, minor))
    }

    /// Scan commits (newest first) and determine the version bump.
    ///
    /// A major match wins immediately, downgraded to minor when the last
    /// version is still unstable (0.y.z). A minor match is
    /// recorded but the scan continues since a later commit can still
    /// escalate. Anything else counts as a patch level change. An empty
    /// commit list yields no bump at all.
    pub fn classify(&self, commits: &[Commit], unstable: bool) -> VersionBump {
        if commits.is_empty() {
            return VersionBump::None;
        }

        let mut bump = VersionBump::Patch;
        for commit in commits {
            if self.major_pattern.is_match(&commit.message) {
                if unstable {
                    trace!(
                        hash = %commit.hash,
                        "major change detected but the last version is unstable, using a minor bump"
                    );
                    return VersionBump::Minor;
                }
                trace!(hash = %commit.hash, "major change detected");
                return VersionBump::Major;
            }
            if self.minor_pattern.is_match(&commit.message) {
                trace!(hash = %commit.hash, "minor change detected");
                bump = VersionBump::Minor;
            }
        }
        bump
    }
}

impl Default for CommitAnalyzer {
    fn default() -> Self {
        CommitAnalyzer {
            major_pattern: Regex::new(DEFAULT_MAJOR_PATTERN)
                .expect("hard-coded major pattern is valid"),
            minor_pattern: Regex::new(DEFAULT_MINOR_PATTERN)
                .expect("hard-coded minor pattern is valid"),
        }
    }
}
