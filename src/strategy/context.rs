use crate::domain::{Commit, Tag, Version};

/// Everything known about the repository state when computing the next
/// version. Also the data templates are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context<'a> {
    /// Current branch name
    pub branch: &'a str,
    /// Parsed version of the last tag, zero version when there is no tag
    pub last_version: &'a Version,
    /// Last tag reachable from HEAD, empty name when there is no tag
    pub last_tag: &'a Tag,
    /// Commits since the last tag, newest first
    pub commits: &'a [Commit],
}

impl<'a> Context<'a> {
    /// Create a new context
    pub fn new(
        branch: &'a str,
        last_version: &'a Version,
        last_tag: &'a Tag,
        commits: &'a [Commit],
    ) -> Self {
        Context {
            branch,
            last_version,
            last_tag,
            commits,
        }
    }
}
