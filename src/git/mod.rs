//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git queries the
//! bump engine needs, allowing for multiple implementations including the
//! real git binary and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [GitRepo] trait. The concrete
//! implementations include:
//!
//! - [cli::GitCli]: A real implementation shelling out to the `git` binary
//! - [mock::MockGitRepo]: A mock implementation for testing
//!
//! # Usage
//!
//! Most code should depend on the [GitRepo] trait rather than concrete
//! implementations to enable easy testing and flexibility.
//!
//! ```rust
//! # use git_nextver::git::GitRepo;
//! # fn example<R: GitRepo>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! repo.fetch_tags()?;
//! let commits = repo.get_commits("v1.0.0", "HEAD")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;
pub mod process;

pub use cli::{GitCli, GIT_BRANCH_ENV};
pub use mock::{MockFailure, MockGitRepo};
pub use process::GitCommand;

use crate::domain::{Commit, Tag};
use crate::error::CommandResult;

/// Common git query trait for abstraction
///
/// This trait abstracts the git queries needed to compute a version bump,
/// allowing both a real implementation and mocks for testing.
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across
/// threads.
///
/// ## Error Handling
///
/// All methods return [crate::error::CommandResult] so a hung or failed
/// `git` invocation stays distinguishable. The caller attaches the failing
/// stage when wrapping into [crate::error::NextverError].
///
/// ## Implementations
///
/// - [GitCli](cli::GitCli): Real implementation driving the `git` binary
/// - [MockGitRepo](mock::MockGitRepo): Test implementation with injectable
///   state and failures
pub trait GitRepo: Send + Sync {
    /// Fetch tags from the default remote
    ///
    /// A repository without a remote makes this a no-op.
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the fetch fails, times out or git cannot be spawned
    fn fetch_tags(&self) -> CommandResult<()>;

    /// Get the commits in a revision range, newest first
    ///
    /// The range excludes `from` and includes `to`. An empty `from` means
    /// "from the beginning of the history", an empty `to` means `HEAD`.
    ///
    /// # Arguments
    /// * `from` - Revision the range starts after (e.g. a tag name)
    /// * `to` - Revision the range ends at (inclusive)
    ///
    /// # Returns
    /// * `Ok(Vec<Commit>)` - Commits in the range, newest first
    /// * `Err` - If a revision does not exist or the invocation fails
    ///
    /// # Example
    /// ```rust
    /// # use git_nextver::git::GitRepo;
    /// # fn example<R: GitRepo>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
    /// let commits = repo.get_commits("v1.0.0", "HEAD")?;
    /// for commit in commits {
    ///     println!("{}: {}", commit.hash.short(), commit.message);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn get_commits(&self, from: &str, to: &str) -> CommandResult<Vec<Commit>>;

    /// Count the commits on the ancestry path of a revision range
    ///
    /// Stricter than [GitRepo::get_commits]: only commits that are both
    /// descendants of `from` and ancestors of `to` are counted, so commits
    /// merged in from a branch forked before `from` do not contribute even
    /// though `get_commits` lists them.
    ///
    /// # Arguments
    /// * `from` - Revision the range starts after
    /// * `to` - Revision the range ends at (inclusive)
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of commits in the range
    /// * `Err` - If the invocation fails
    fn count_commits(&self, from: &str, to: &str) -> CommandResult<usize>;

    /// Find the nearest ancestor tag that looks like a version
    ///
    /// Follows first-parent ancestry from `rev` and only considers tags
    /// whose name contains a numeric dotted triple.
    ///
    /// # Arguments
    /// * `rev` - Revision to start from (e.g. `HEAD`)
    ///
    /// # Returns
    /// * `Ok(Some(Tag))` - The nearest matching tag
    /// * `Ok(None)` - No matching tag reachable from `rev`
    /// * `Err` - If the invocation fails for another reason
    ///
    /// # Example
    /// ```rust
    /// # use git_nextver::git::GitRepo;
    /// # fn example<R: GitRepo>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.get_last_relative_tag("HEAD")? {
    ///     Some(tag) => println!("last tag: {}", tag.name),
    ///     None => println!("no tag yet"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn get_last_relative_tag(&self, rev: &str) -> CommandResult<Option<Tag>>;

    /// Get the current branch name
    ///
    /// On a detached HEAD (typical on CI servers) implementations fall back
    /// to the `GIT_BRANCH` environment variable before giving up.
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name
    /// * `Err` - If the branch cannot be determined at all
    fn get_current_branch(&self) -> CommandResult<String>;
}
