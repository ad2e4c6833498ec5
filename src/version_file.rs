//! Version hint files
//!
//! A version file holds a single release version (e.g. `v2.0.0`) as its whole
//! content, surrounding whitespace ignored. Problems with individual files are
//! reported and skipped; only a failed read of an existing regular file aborts.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::ReleaseVersion;
use crate::error::{Result, VersionTagError};

/// Read one version file.
///
/// # Returns
/// * `Ok(Some(version))` - The file holds a valid release version
/// * `Ok(None)` - The file is missing, not a regular file, empty or malformed
/// * `Err` - The file exists but could not be read
pub fn read_version_file(path: &Path) -> Result<Option<ReleaseVersion>> {
    if !path.exists() {
        warn!("file \"{}\" doesn't exist", path.display());
        return Ok(None);
    }

    if !path.is_file() {
        warn!("\"{}\" isn't a file", path.display());
        return Ok(None);
    }

    let content =
        fs::read_to_string(path).map_err(|e| VersionTagError::file_access(path, e))?;
    let content = content.trim();

    if content.is_empty() {
        warn!("file \"{}\" is empty", path.display());
        return Ok(None);
    }

    match ReleaseVersion::parse(content) {
        Some(version) => {
            info!("file \"{}\" has version \"{}\"", path.display(), version);
            Ok(Some(version))
        }
        None => {
            warn!("file \"{}\" doesn't contain a valid version", path.display());
            Ok(None)
        }
    }
}

/// Highest release version declared by any of `paths`, in input order.
///
/// Returns `Ok(None)` when no file yields a valid version.
pub fn max_file_version<P: AsRef<Path>>(paths: &[P]) -> Result<Option<ReleaseVersion>> {
    let mut max = None;
    for path in paths {
        let version = read_version_file(path.as_ref())?;
        max = max.max(version);
    }
    Ok(max)
}
