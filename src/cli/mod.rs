//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{resolve_tag, run, ResolveRequest, VersionKind};
