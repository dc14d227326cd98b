use std::time::Duration;

use crate::domain::{Commit, Tag};
use crate::error::{CommandError, CommandResult};
use crate::git::GitRepo;

/// The collaborator call a mock failure is injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    FetchTags,
    GetCommits,
    CountCommits,
    GetLastRelativeTag,
    GetCurrentBranch,
}

/// Mock repository for testing without actual git operations.
///
/// Holds a fixed branch, an optional last tag and a commit list returned
/// regardless of the requested range. A failure can be injected into any
/// single call, either as a plain command failure or as a timeout.
pub struct MockGitRepo {
    commits: Vec<Commit>,
    last_tag: Option<Tag>,
    branch: String,
    fail_on: Option<MockFailure>,
    fail_with_timeout: bool,
}

impl MockGitRepo {
    /// Create a mock on branch `master` with no tag and no commits
    pub fn new() -> Self {
        MockGitRepo {
            commits: Vec::new(),
            last_tag: None,
            branch: "master".to_string(),
            fail_on: None,
            fail_with_timeout: false,
        }
    }

    /// Set the current branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the last relative tag
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.last_tag = Some(Tag::new(name));
        self
    }

    /// Set the commits since the last tag, newest first
    pub fn with_commits(mut self, commits: Vec<Commit>) -> Self {
        self.commits = commits;
        self
    }

    /// Set the commits from bare messages, fabricating deterministic hashes
    pub fn with_messages(mut self, messages: &[&str]) -> Self {
        self.commits = messages
            .iter()
            .enumerate()
            .map(|(i, m)| Commit::new(format!("{:040x}", i + 1), *m))
            .collect();
        self
    }

    /// Make the given call fail with a command error
    pub fn failing_on(mut self, call: MockFailure) -> Self {
        self.fail_on = Some(call);
        self.fail_with_timeout = false;
        self
    }

    /// Make the given call fail with a timeout
    pub fn timing_out_on(mut self, call: MockFailure) -> Self {
        self.fail_on = Some(call);
        self.fail_with_timeout = true;
        self
    }

    fn check(&self, call: MockFailure, command: &str) -> CommandResult<()> {
        if self.fail_on == Some(call) {
            if self.fail_with_timeout {
                return Err(CommandError::Timeout {
                    command: command.to_string(),
                    timeout: Duration::from_secs(180),
                });
            }
            return Err(CommandError::Failed {
                command: command.to_string(),
                code: Some(128),
                stderr: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockGitRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRepo for MockGitRepo {
    fn fetch_tags(&self) -> CommandResult<()> {
        self.check(MockFailure::FetchTags, "git fetch --tags")
    }

    fn get_commits(&self, _from: &str, _to: &str) -> CommandResult<Vec<Commit>> {
        self.check(MockFailure::GetCommits, "git log")?;
        Ok(self.commits.clone())
    }

    fn count_commits(&self, _from: &str, _to: &str) -> CommandResult<usize> {
        self.check(MockFailure::CountCommits, "git rev-list")?;
        Ok(self.commits.len())
    }

    fn get_last_relative_tag(&self, _rev: &str) -> CommandResult<Option<Tag>> {
        self.check(MockFailure::GetLastRelativeTag, "git describe")?;
        Ok(self.last_tag.clone())
    }

    fn get_current_branch(&self) -> CommandResult<String> {
        self.check(MockFailure::GetCurrentBranch, "git symbolic-ref --short HEAD")?;
        Ok(self.branch.clone())
    }
}
