//! Version resolution workflow
//!
//! Glue between the parsed command line and the library: resolve the version
//! for one request and write the result line. Kept apart from clap so the
//! workflow can be driven programmatically with any [TagSource].

use std::io::Write;
use std::path::PathBuf;

use crate::analyzer::VersionResolver;
use crate::error::Result;
use crate::git::TagSource;
use crate::output::OutputTarget;

/// Which version to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    /// Next mainline release, `v<major>.<minor>.<patch>`
    Release,
    /// Next pre-release of a pull request, `v<major>.<minor>.<patch>-PR-<pr>.<sub>`
    PullRequest(u32),
}

/// Arguments for one resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    pub kind: VersionKind,

    /// Commit-ish bounding the history scan; HEAD when `None`
    pub reference: Option<String>,

    /// Version hint files
    pub files: Vec<PathBuf>,

    /// Collision-avoidance cap; unbounded when `None`
    pub max_collision_attempts: Option<u32>,
}

/// Compute the tag string for `request`.
pub fn resolve_tag<S: TagSource>(source: S, request: &ResolveRequest) -> Result<String> {
    let resolver =
        VersionResolver::new(source).with_max_collision_attempts(request.max_collision_attempts);
    let reference = request.reference.as_deref();

    Ok(match request.kind {
        VersionKind::Release => resolver.next_version(reference, &request.files)?.to_string(),
        VersionKind::PullRequest(pr) => resolver
            .next_pr_version(pr, reference, &request.files)?
            .to_string(),
    })
}

/// Resolve `request` and emit the result through `target`.
///
/// Nothing is written unless resolution succeeds.
pub fn run<S: TagSource, W: Write>(
    source: S,
    request: &ResolveRequest,
    target: &OutputTarget,
    stdout: &mut W,
) -> Result<String> {
    let tag = resolve_tag(source, request)?;
    target.emit(&tag, stdout)?;
    Ok(tag)
}
