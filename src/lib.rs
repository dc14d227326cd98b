//! Compute the next semantic version of a git repository from its tags,
//! its commit history and branch aware bump rules.

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod strategy;

pub use error::{NextverError, Result};
