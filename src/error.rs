use std::time::Duration;
use thiserror::Error;

/// Unified error type for git-nextver operations
#[derive(Error, Debug)]
pub enum NextverError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("'{0}' is not a semver compatible version")]
    NotSemver(String),

    #[error("cannot {stage}: {source}")]
    Git { stage: String, source: CommandError },

    #[error("Template evaluation error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised by an external git invocation.
///
/// Timeouts are a distinct variant so callers can tell a hung subprocess
/// apart from a plain non-zero exit.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("command `{command}` timed out after {} seconds", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    #[error("command `{command}` failed with {}: {stderr}", describe_exit(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

/// Convenience type alias for Results in git-nextver
pub type Result<T> = std::result::Result<T, NextverError>;

/// Result of a raw git invocation, before stage context is attached
pub type CommandResult<T> = std::result::Result<T, CommandError>;

impl NextverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextverError::Config(msg.into())
    }

    /// Create a parse error for a non-semver tag name
    pub fn not_semver(text: impl Into<String>) -> Self {
        NextverError::NotSemver(text.into())
    }

    /// Create a template evaluation error with context
    pub fn template(msg: impl Into<String>) -> Self {
        NextverError::Template(msg.into())
    }

    /// Wrap a failed git invocation with the name of the stage that ran it
    pub fn git(stage: impl Into<String>, source: CommandError) -> Self {
        NextverError::Git {
            stage: stage.into(),
            source,
        }
    }
}

impl CommandError {
    /// Returns true if the command was killed after exceeding its timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, CommandError::Timeout { .. })
    }
}
