//! Domain logic - version types and tag grammars, independent of git operations

pub mod version;

pub use version::{parse_pr, parse_release, PrVersion, ReleaseVersion};
