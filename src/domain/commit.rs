use std::fmt;

/// Commit hash in full hex form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hash(String);

impl Hash {
    /// The abbreviated form: the first 7 hex characters
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(7)]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Hash {
    fn from(hex: String) -> Self {
        Hash(hex)
    }
}

impl From<&str> for Hash {
    fn from(hex: &str) -> Self {
        Hash(hex.to_string())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who and when created a commit.
///
/// `email` cannot be assumed to be well-formed; `timestamp` is unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub timestamp: i64,
}

impl Signature {
    pub fn new(name: impl Into<String>, email: impl Into<String>, timestamp: i64) -> Self {
        Signature {
            name: name.into(),
            email: email.into(),
            timestamp,
        }
    }
}

/// A single commit as produced by the git collaborator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    pub hash: Hash,
    /// Original author of the change
    pub author: Signature,
    /// The one performing the commit, possibly different from the author
    pub committer: Signature,
    /// Full commit message, subject and body
    pub message: String,
}

impl Commit {
    /// Create a commit with the given hash and message and empty signatures
    pub fn new(hash: impl Into<Hash>, message: impl Into<String>) -> Self {
        Commit {
            hash: hash.into(),
            message: message.into(),
            ..Commit::default()
        }
    }
}
