//! Result emission
//!
//! The computed tag is written exactly once, in one of three shapes:
//!
//! - `set-output`: `::set-output name=TAG::v1.2.3` on stdout, the legacy
//!   GitHub Actions workflow command kept for compatibility
//! - `github-output`: `TAG=v1.2.3` appended to the `GITHUB_OUTPUT` file
//! - `plain`: the bare tag on stdout

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionTagError};

/// Output name used when none is configured
pub const DEFAULT_OUTPUT_NAME: &str = "TAG";

/// How the computed tag is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `::set-output name=<NAME>::<tag>` on stdout
    #[default]
    SetOutput,
    /// `<NAME>=<tag>` appended to the GitHub Actions output file
    GithubOutput,
    /// The bare tag on stdout
    Plain,
}

/// Where and how to write the result line
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub name: String,
    /// Output file for [OutputFormat::GithubOutput]; stdout when unset
    pub github_output: Option<PathBuf>,
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget {
            format: OutputFormat::default(),
            name: DEFAULT_OUTPUT_NAME.to_string(),
            github_output: None,
        }
    }
}

impl OutputTarget {
    /// Format the result line (without trailing newline)
    pub fn render(&self, tag: &str) -> String {
        match self.format {
            OutputFormat::SetOutput => format!("::set-output name={}::{}", self.name, tag),
            OutputFormat::GithubOutput => format!("{}={}", self.name, tag),
            OutputFormat::Plain => tag.to_string(),
        }
    }

    /// Write the result line for `tag`, to `stdout` unless an output file applies
    pub fn emit<W: Write>(&self, tag: &str, stdout: &mut W) -> Result<()> {
        let line = self.render(tag);

        match (&self.format, &self.github_output) {
            (OutputFormat::GithubOutput, Some(path)) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        VersionTagError::config(format!(
                            "Cannot open output file '{}': {}",
                            path.display(),
                            e
                        ))
                    })?;
                writeln!(file, "{}", line)?;
            }
            _ => {
                writeln!(stdout, "{}", line)?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_legacy_set_output_text() {
        let target = OutputTarget::default();
        assert_eq!(target.render("v1.2.3"), "::set-output name=TAG::v1.2.3");

        let mut out = Vec::new();
        target.emit("v1.2.3-PR-7.4", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "::set-output name=TAG::v1.2.3-PR-7.4\n"
        );
    }

    #[test]
    fn test_plain_output() {
        let target = OutputTarget {
            format: OutputFormat::Plain,
            ..OutputTarget::default()
        };
        let mut out = Vec::new();
        target.emit("v0.0.0", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "v0.0.0\n");
    }

    #[test]
    fn test_github_output_appends_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        fs::write(&path, "other=value\n").unwrap();

        let target = OutputTarget {
            format: OutputFormat::GithubOutput,
            name: "tag".to_string(),
            github_output: Some(path.clone()),
        };
        let mut out = Vec::new();
        target.emit("v2.0.0", &mut out).unwrap();

        assert!(out.is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "other=value\ntag=v2.0.0\n"
        );
    }

    #[test]
    fn test_github_output_without_file_uses_stdout() {
        let target = OutputTarget {
            format: OutputFormat::GithubOutput,
            ..OutputTarget::default()
        };
        let mut out = Vec::new();
        target.emit("v2.0.0", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "TAG=v2.0.0\n");
    }

    #[test]
    fn test_format_names_in_config() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: OutputFormat,
        }
        let parsed: Wrapper = toml::from_str("format = \"github-output\"").unwrap();
        assert_eq!(parsed.format, OutputFormat::GithubOutput);
    }
}
