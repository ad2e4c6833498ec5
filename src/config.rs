use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analyzer::DEFAULT_MAX_COLLISION_ATTEMPTS;
use crate::error::{Result, VersionTagError};
use crate::git::Backend;
use crate::output::{OutputFormat, DEFAULT_OUTPUT_NAME};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "versiontag.toml";

/// Represents the complete configuration for version-tag.
///
/// Every value can be overridden from the command line.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Version files consulted when `--file` is not given
    #[serde(default)]
    pub files: Vec<PathBuf>,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub tags: TagsConfig,
}

fn default_output_name() -> String {
    DEFAULT_OUTPUT_NAME.to_string()
}

fn default_max_collision_attempts() -> u32 {
    DEFAULT_MAX_COLLISION_ATTEMPTS
}

/// How the result is reported.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_output_name")]
    pub name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::default(),
            name: default_output_name(),
        }
    }
}

/// How tags are read and how hard collisions are retried.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default)]
    pub backend: Backend,

    /// 0 disables the cap
    #[serde(default = "default_max_collision_attempts")]
    pub max_collision_attempts: u32,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            backend: Backend::default(),
            max_collision_attempts: default_max_collision_attempts(),
        }
    }
}

impl TagsConfig {
    /// Collision cap as understood by the resolver
    pub fn collision_cap(&self) -> Option<u32> {
        (self.max_collision_attempts > 0).then_some(self.max_collision_attempts)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versiontag.toml` in current directory
/// 3. `versiontag.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match discover_config() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        VersionTagError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    parse_config(&content)
        .map_err(|e| VersionTagError::config(format!("Invalid '{}': {}", path.display(), e)))
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.files.is_empty());
        assert_eq!(config.output.format, OutputFormat::SetOutput);
        assert_eq!(config.output.name, "TAG");
        assert_eq!(config.tags.backend, Backend::Git2);
        assert_eq!(config.tags.collision_cap(), Some(DEFAULT_MAX_COLLISION_ATTEMPTS));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = parse_config(
            r#"
files = ["VERSION"]

[output]
format = "plain"

[tags]
backend = "git-cli"
"#,
        )
        .unwrap();

        assert_eq!(config.files, vec![PathBuf::from("VERSION")]);
        assert_eq!(config.output.format, OutputFormat::Plain);
        assert_eq!(config.output.name, "TAG");
        assert_eq!(config.tags.backend, Backend::GitCli);
        assert_eq!(
            config.tags.max_collision_attempts,
            DEFAULT_MAX_COLLISION_ATTEMPTS
        );
    }

    #[test]
    fn test_zero_disables_collision_cap() {
        let config = parse_config("[tags]\nmax_collision_attempts = 0\n").unwrap();
        assert_eq!(config.tags.collision_cap(), None);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(parse_config("[tags]\nbackend = \"svn\"\n").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = load_config(Some(Path::new("/nonexistent/versiontag.toml"))).unwrap_err();
        assert!(matches!(err, VersionTagError::Config(_)));
    }
}
