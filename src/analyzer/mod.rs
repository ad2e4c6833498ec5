//! Version resolution from tag history and version files

pub mod pr_resolver;
pub mod version_resolver;

pub use pr_resolver::max_tag_pr_version;
pub use version_resolver::{max_tag_version, VersionResolver, DEFAULT_MAX_COLLISION_ATTEMPTS};
