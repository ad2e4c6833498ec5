//! Tag source abstraction layer
//!
//! This module provides a trait-based abstraction over the two read-only tag
//! queries version resolution needs, allowing the resolver to run against a
//! real repository or an in-memory fixture.
//!
//! # Overview
//!
//! The primary abstraction is the [TagSource] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2TagSource]: reads the repository through the `git2` crate
//! - [command::GitCommandTagSource]: shells out to the `git` executable
//! - [mock::MockTagSource]: a mock implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use version_tag::git::TagSource;
//! # fn example<S: TagSource>(source: &S) -> Result<(), Box<dyn std::error::Error>> {
//! let reachable = source.list_history_tags(Some("main"))?;
//! let everything = source.list_all_tags()?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommandTagSource;
pub use mock::MockTagSource;
pub use repository::Git2TagSource;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Read-only view of a repository's tags
///
/// ## Error Handling
///
/// Any failure of the underlying query is fatal for the invocation and is
/// reported as [crate::error::VersionTagError::Vcs] or
/// [crate::error::VersionTagError::Git].
pub trait TagSource {
    /// Tags attached to commits in the ancestry of `reference`
    ///
    /// Walks from `reference` (or the current checkout when `None`) back
    /// through history, most recent commit first. A commit may carry several
    /// tags; each is yielded once per occurrence.
    ///
    /// # Arguments
    /// * `reference` - Optional commit-ish limiting the walk (e.g., "main", "v1.2.0", a SHA)
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names in commit order
    /// * `Err` - If the reference cannot be resolved or the query fails
    fn list_history_tags(&self, reference: Option<&str>) -> Result<Vec<String>>;

    /// Every tag in the repository, in no particular order
    fn list_all_tags(&self) -> Result<Vec<String>>;
}

impl<S: TagSource + ?Sized> TagSource for &S {
    fn list_history_tags(&self, reference: Option<&str>) -> Result<Vec<String>> {
        (**self).list_history_tags(reference)
    }

    fn list_all_tags(&self) -> Result<Vec<String>> {
        (**self).list_all_tags()
    }
}

impl<S: TagSource + ?Sized> TagSource for Box<S> {
    fn list_history_tags(&self, reference: Option<&str>) -> Result<Vec<String>> {
        (**self).list_history_tags(reference)
    }

    fn list_all_tags(&self) -> Result<Vec<String>> {
        (**self).list_all_tags()
    }
}

/// Which implementation to read tags with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// In-process via libgit2
    #[default]
    Git2,
    /// The `git` executable on PATH
    GitCli,
}

/// Open the tag source selected by `backend` for the repository at `path`
pub fn open(backend: Backend, path: &std::path::Path) -> Result<Box<dyn TagSource>> {
    Ok(match backend {
        Backend::Git2 => Box::new(Git2TagSource::open(path)?),
        Backend::GitCli => Box::new(GitCommandTagSource::new(path)),
    })
}
