pub mod analyzer;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod ui;
pub mod version_file;

pub use analyzer::VersionResolver;
pub use domain::{PrVersion, ReleaseVersion};
pub use error::{Result, VersionTagError};
