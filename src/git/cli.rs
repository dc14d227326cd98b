use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, trace};

use crate::domain::{Commit, Hash, Signature, Tag};
use crate::error::{CommandError, CommandResult};
use crate::git::process::{GitCommand, DEFAULT_TIMEOUT};
use crate::git::GitRepo;

/// Environment variable consulted when HEAD is detached, as on most CI
/// servers.
pub const GIT_BRANCH_ENV: &str = "GIT_BRANCH";

const SEPARATOR: &str = "-->8--";
const DELIMITER: &str = "$_$";

const HASH_FIELD: &str = "HASH";
const AUTHOR_FIELD: &str = "AUTHOR";
const COMMITTER_FIELD: &str = "COMMITTER";
const MESSAGE_FIELD: &str = "MESSAGE";

const LOG_FORMAT: &str = concat!(
    "-->8--",
    "HASH:%H",
    "$_$",
    "AUTHOR:%an\t%ae\t%at",
    "$_$",
    "COMMITTER:%cn\t%ce\t%ct",
    "$_$",
    "MESSAGE:%B"
);

/// [GitRepo] implementation driving the `git` binary in a working
/// directory, every invocation bounded by a timeout.
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
    timeout: Duration,
}

impl GitCli {
    /// Create a client for the repository at `dir` with the default timeout
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        GitCli {
            dir: dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client with a custom per-invocation timeout
    pub fn with_timeout(dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        GitCli {
            dir: dir.into(),
            timeout,
        }
    }

    fn git(&self) -> GitCommand {
        GitCommand::new("git")
            .current_dir(&self.dir)
            .timeout(self.timeout)
    }
}

impl GitRepo for GitCli {
    fn fetch_tags(&self) -> CommandResult<()> {
        self.git().args(["fetch", "--tags"]).run().map(|_| ())
    }

    fn get_commits(&self, from: &str, to: &str) -> CommandResult<Vec<Commit>> {
        let rev = parse_rev(from, to);
        let pretty = format!("--pretty={}", LOG_FORMAT);
        let out = self
            .git()
            .args(["log", rev.as_str(), "--no-decorate", pretty.as_str()])
            .run()?;
        Ok(parse_commits(&out))
    }

    fn count_commits(&self, from: &str, to: &str) -> CommandResult<usize> {
        let rev = parse_rev(from, to);
        let command = self
            .git()
            .args(["rev-list", "--ancestry-path", "--count", rev.as_str()]);
        let out = command.run()?;
        out.parse().map_err(|_| CommandError::Failed {
            command: command.to_string(),
            code: Some(0),
            stderr: format!("unexpected commit count '{}'", out),
        })
    }

    fn get_last_relative_tag(&self, rev: &str) -> CommandResult<Option<Tag>> {
        let result = self
            .git()
            .args([
                "describe",
                "--tags",
                "--abbrev=0",
                "--match",
                "*[0-9]*.[0-9]*.[0-9]*",
                "--first-parent",
                rev,
            ])
            .run();
        match result {
            Ok(name) => Ok(Some(Tag::new(name))),
            Err(err @ CommandError::Failed { .. }) => {
                debug!(error = %err, "describe found no version tag");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn get_current_branch(&self) -> CommandResult<String> {
        match self.git().args(["symbolic-ref", "--short", "HEAD"]).run() {
            Ok(branch) => Ok(branch),
            Err(err) => {
                // detached HEAD, typical on CI servers
                trace!("reading branch name from the {} variable", GIT_BRANCH_ENV);
                let from_env = std::env::var(GIT_BRANCH_ENV)
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default();
                if from_env.is_empty() {
                    Err(err)
                } else {
                    Ok(from_env)
                }
            }
        }
    }
}

fn parse_rev(from: &str, to: &str) -> String {
    let to = if to.is_empty() { "HEAD" } else { to };
    if from.is_empty() {
        to.to_string()
    } else {
        format!("{}..{}", from, to)
    }
}

fn parse_commits(out: &str) -> Vec<Commit> {
    out.split(SEPARATOR).skip(1).map(parse_commit).collect()
}

fn parse_commit(record: &str) -> Commit {
    let mut commit = Commit::default();
    for token in record.split(DELIMITER) {
        if let Some((field, value)) = token.split_once(':') {
            let value = value.trim();
            match field {
                HASH_FIELD => commit.hash = Hash::from(value),
                AUTHOR_FIELD => commit.author = parse_signature(value),
                COMMITTER_FIELD => commit.committer = parse_signature(value),
                MESSAGE_FIELD => commit.message = value.to_string(),
                _ => {}
            }
        }
    }
    commit
}

fn parse_signature(value: &str) -> Signature {
    let mut parts = value.split('\t');
    let name = parts.next().unwrap_or_default();
    let email = parts.next().unwrap_or_default();
    let timestamp = parts.next().and_then(|t| t.parse().ok()).unwrap_or(0);
    Signature::new(name, email, timestamp)
}
