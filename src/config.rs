use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{TagPattern, DEFAULT_TAG_PATTERN};
use crate::error::{ChangelogError, Result};
use crate::render::DEFAULT_HEADING;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "prchangelog.toml";

/// Config file looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".prchangelog.toml";

/// Represents the complete configuration for pr-changelog.
///
/// Every value has a default, and the command line overrides what the file says.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_tag_pattern() -> String {
    DEFAULT_TAG_PATTERN.to_string()
}

fn default_heading() -> String {
    DEFAULT_HEADING.to_string()
}

fn default_repository_path() -> PathBuf {
    PathBuf::from(".")
}

/// Which tags count as releases.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            pattern: default_tag_pattern(),
        }
    }
}

impl TagsConfig {
    /// Compile the configured release tag pattern
    pub fn compile(&self) -> Result<TagPattern> {
        TagPattern::new(&self.pattern)
    }
}

/// Where the history comes from and where links point to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    /// Base URL of the hosted repository, used for every link
    #[serde(default)]
    pub url: Option<String>,

    /// Branch whose history is described
    #[serde(default)]
    pub branch: Option<String>,

    /// Local repository location
    #[serde(default = "default_repository_path")]
    pub path: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            url: None,
            branch: None,
            path: default_repository_path(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_heading")]
    pub heading: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            heading: default_heading(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `prchangelog.toml` in current directory
/// 3. `.prchangelog.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ChangelogError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| ChangelogError::config(format!("Cannot parse {}: {}", path.display(), e)))
}
