use serde::{Deserialize, Serialize};
use std::fs::File;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use thiserror::Error;
use userdir_types::{Theme, DEFAULT_PAGE_SIZE};

use crate::paths::get_config_path;

struct ConfigLock {
    _file: File,
}

impl ConfigLock {
    fn acquire_exclusive(config_path: &Path) -> Result<Self, std::io::Error> {
        let lock_path = config_path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)?;
        let fd = file.as_raw_fd();
        let result = unsafe { libc::flock(fd, libc::LOCK_EX) };
        if result != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(ConfigLock { _file: file })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_location")]
    pub location: String,
    /// Seconds; 0 waits indefinitely.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_location() -> String {
    "users.json".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// 0 picks the column count from the terminal width.
    #[serde(default)]
    pub columns: u32,
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default)]
    pub default_theme: Theme,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            columns: 0,
            color: default_color(),
            default_theme: Theme::default(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_color() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            source: SourceConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let _lock = ConfigLock::acquire_exclusive(config_path)?;
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        let _lock = ConfigLock::acquire_exclusive(config_path)?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.display.page_size == 0 {
            return Err(ConfigError::Invalid(
                "display.page_size must be at least 1".to_string(),
            ));
        }
        if self.source.location.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "source.location must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
