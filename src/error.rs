use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ReleaseVersion;

/// Unified error type for version-tag operations
#[derive(Error, Debug)]
pub enum VersionTagError {
    #[error("Version control query failed: {0}")]
    Vcs(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Cannot read version file '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free version tag found after {attempts} attempts starting from {start}")]
    VersionExhausted {
        start: ReleaseVersion,
        attempts: u32,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-tag
pub type Result<T> = std::result::Result<T, VersionTagError>;

impl VersionTagError {
    /// Create a version control error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        VersionTagError::Vcs(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionTagError::Config(msg.into())
    }

    /// Create a file access error for `path`
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VersionTagError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
