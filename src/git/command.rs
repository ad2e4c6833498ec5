use std::path::PathBuf;
use std::process::Command;

use crate::error::{Result, VersionTagError};
use crate::git::TagSource;

/// Tag source that runs the `git` executable
///
/// History tags come from the commit decorations printed by
/// `git log --format=%D [REF]`, all tags from `git tag -l`.
pub struct GitCommandTagSource {
    workdir: PathBuf,
}

impl GitCommandTagSource {
    /// Run git queries inside `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        GitCommandTagSource {
            workdir: workdir.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| VersionTagError::vcs(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VersionTagError::vcs(format!(
                "`git {}` failed with exit code {}: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TagSource for GitCommandTagSource {
    fn list_history_tags(&self, reference: Option<&str>) -> Result<Vec<String>> {
        let mut args = vec!["log", "--format=%D"];
        if let Some(reference) = reference {
            args.push(reference);
        }
        Ok(parse_decorations(&self.run(&args)?))
    }

    fn list_all_tags(&self) -> Result<Vec<String>> {
        Ok(parse_tag_list(&self.run(&["tag", "-l"])?))
    }
}

/// Extract tag names from `git log --format=%D` output.
///
/// Each line lists a commit's decorations, e.g.
/// `HEAD -> main, tag: v1.2.0, origin/main`; only `tag:` entries are kept.
pub fn parse_decorations(output: &str) -> Vec<String> {
    output
        .lines()
        .flat_map(|line| line.split(','))
        .filter_map(|entry| entry.trim().strip_prefix("tag:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Extract tag names from `git tag -l` output, one per line.
pub fn parse_tag_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
