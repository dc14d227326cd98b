//! Domain logic - pure version and commit types independent of git operations

pub mod bumper;
pub mod commit;
pub mod tag;
pub mod version;

pub use bumper::VersionBump;
pub use commit::{Commit, Hash, Signature};
pub use tag::Tag;
pub use version::Version;
