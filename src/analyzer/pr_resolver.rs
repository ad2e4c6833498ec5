use std::path::Path;

use tracing::info;

use crate::analyzer::VersionResolver;
use crate::domain::PrVersion;
use crate::error::{Result, VersionTagError};
use crate::git::TagSource;

impl<S: TagSource> VersionResolver<S> {
    /// Next pre-release version for pull request `pr`.
    ///
    /// The release part is [`VersionResolver::next_version`]. The sub-counter
    /// continues from the highest existing `-PR-<pr>.<sub>` tag anywhere in the
    /// repository, even when that tag sits on an older release, and starts at 0
    /// for a pull request without tags.
    pub fn next_pr_version<P: AsRef<Path>>(
        &self,
        pr: u32,
        reference: Option<&str>,
        files: &[P],
    ) -> Result<PrVersion> {
        let max_pr_tag = max_tag_pr_version(pr, &self.source.list_all_tags()?);
        if let Some(version) = max_pr_tag {
            info!("latest pr tag version is \"{}\"", version);
        }

        let next = self.next_version(reference, files)?;
        let sub = match max_pr_tag {
            Some(version) => {
                version
                    .sub
                    .checked_add(1)
                    .ok_or(VersionTagError::VersionExhausted {
                        start: version.release,
                        attempts: 0,
                    })?
            }
            None => 0,
        };

        Ok(PrVersion::new(next, pr, sub))
    }
}

/// Highest PR version for `pr` among `tags`, ranked by sub-counter.
///
/// Tags of other pull requests and tags outside the PR grammar are ignored.
pub fn max_tag_pr_version<T: AsRef<str>>(pr: u32, tags: &[T]) -> Option<PrVersion> {
    tags.iter()
        .filter_map(|tag| PrVersion::parse(tag.as_ref()))
        .filter(|version| version.pr == pr)
        .max_by_key(|version| (version.sub, version.release))
}
