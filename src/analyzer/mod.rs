//! Commit classification for the automatic bump strategy

pub mod commit_analyzer;

pub use commit_analyzer::{CommitAnalyzer, DEFAULT_MAJOR_PATTERN, DEFAULT_MINOR_PATTERN};
