//! Branch aware bump strategies and the bump engine

pub mod context;
pub mod engine;
pub mod rule;
pub mod template;

pub use context::Context;
pub use engine::{BumpAction, BumpEngine, BumpStrategy};
pub use rule::{
    default_rules, BranchRule, Strategy, DEFAULT_BUILD_METADATA_TEMPLATE,
    DEFAULT_RELEASE_BRANCHES_PATTERN,
};
pub use template::Template;
