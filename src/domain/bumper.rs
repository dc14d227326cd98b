use crate::domain::version::Version;
use std::fmt;

/// The bump class decided for a version: which number moves, if any.
///
/// `None` is the identity and leaves the version untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    None,
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    /// Apply this bump to a version, returning the new value
    pub fn apply(&self, version: &Version) -> Version {
        match self {
            VersionBump::None => version.clone(),
            VersionBump::Major => version.bump_major(),
            VersionBump::Minor => version.bump_minor(),
            VersionBump::Patch => version.bump_patch(),
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::None => "NONE",
            VersionBump::Major => "MAJOR",
            VersionBump::Minor => "MINOR",
            VersionBump::Patch => "PATCH",
        };
        write!(f, "{}", name)
    }
}
