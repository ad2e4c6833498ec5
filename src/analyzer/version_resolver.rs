use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::ReleaseVersion;
use crate::error::{Result, VersionTagError};
use crate::git::TagSource;
use crate::version_file::max_file_version;

/// Default cap on collision-avoidance steps
pub const DEFAULT_MAX_COLLISION_ATTEMPTS: u32 = 10_000;

/// Computes the next release (and PR) version from a tag source
pub struct VersionResolver<S> {
    pub(crate) source: S,
    max_collision_attempts: Option<u32>,
}

impl<S: TagSource> VersionResolver<S> {
    /// Create a resolver with the default collision cap
    pub fn new(source: S) -> Self {
        VersionResolver {
            source,
            max_collision_attempts: Some(DEFAULT_MAX_COLLISION_ATTEMPTS),
        }
    }

    /// Cap the collision-avoidance loop; `None` removes the cap
    pub fn with_max_collision_attempts(mut self, attempts: Option<u32>) -> Self {
        self.max_collision_attempts = attempts;
        self
    }

    /// Next release version.
    ///
    /// 1. Highest release tag reachable from `reference` (or HEAD).
    /// 2. Highest release version declared in `files`.
    /// 3. A file version strictly above the tag version is taken as is;
    ///    otherwise the tag version gets its patch bumped; with neither,
    ///    start at `v0.0.0`.
    /// 4. Bump the patch until the tag does not exist anywhere in the repository.
    pub fn next_version<P: AsRef<Path>>(
        &self,
        reference: Option<&str>,
        files: &[P],
    ) -> Result<ReleaseVersion> {
        let max_tag = max_tag_version(&self.source.list_history_tags(reference)?);
        if let Some(version) = max_tag {
            info!("latest tag version is \"{}\"", version);
        }

        let max_file = max_file_version(files)?;

        let candidate = match (max_file, max_tag) {
            (Some(file), tag) if Some(file) > tag => file,
            (_, Some(tag)) => tag.next_patch().ok_or(VersionTagError::VersionExhausted {
                start: tag,
                attempts: 0,
            })?,
            _ => ReleaseVersion::new(0, 0, 0),
        };

        let all_tags: HashSet<String> = self.source.list_all_tags()?.into_iter().collect();
        self.avoid_collisions(candidate, &all_tags)
    }

    fn avoid_collisions(
        &self,
        start: ReleaseVersion,
        all_tags: &HashSet<String>,
    ) -> Result<ReleaseVersion> {
        let mut version = start;
        let mut attempts = 0u32;

        while all_tags.contains(&version.to_string()) {
            debug!("tag \"{}\" already exists", version);
            attempts += 1;
            let exhausted = VersionTagError::VersionExhausted { start, attempts };
            if self.max_collision_attempts.is_some_and(|max| attempts >= max) {
                return Err(exhausted);
            }
            version = version.next_patch().ok_or(exhausted)?;
        }

        Ok(version)
    }
}

/// Highest release version among `tags`; non-matching tags are ignored.
pub fn max_tag_version<T: AsRef<str>>(tags: &[T]) -> Option<ReleaseVersion> {
    tags.iter()
        .filter_map(|tag| ReleaseVersion::parse(tag.as_ref()))
        .max()
}
