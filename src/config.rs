use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants;
use crate::error::{CleanerError, Result};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "MENU_CLEANER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub menu: MenuConfig,
    pub menu_item: MenuItemConfig,
    pub menu_page: MenuPageConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub file: String,
    pub output: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            file: constants::MENU_FILE.to_string(),
            output: constants::MENU_OUTPUT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuItemConfig {
    pub file: String,
    pub output: String,
    /// Token written for prices that could not be computed
    pub missing_placeholder: String,
}

impl Default for MenuItemConfig {
    fn default() -> Self {
        Self {
            file: constants::MENU_ITEM_FILE.to_string(),
            output: constants::MENU_ITEM_OUTPUT.to_string(),
            missing_placeholder: constants::DEFAULT_MISSING_PRICE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuPageConfig {
    pub file: String,
    pub output: String,
    /// Rows with a blank value in any of these columns are dropped
    pub key_columns: Vec<String>,
    /// Numeric columns rendered as `MISSING` when blank
    pub dimension_columns: Vec<String>,
    /// Free-text columns given a trimmed copy
    pub text_columns: Vec<String>,
}

impl Default for MenuPageConfig {
    fn default() -> Self {
        Self {
            file: constants::MENU_PAGE_FILE.to_string(),
            output: constants::MENU_PAGE_OUTPUT.to_string(),
            key_columns: vec![
                constants::ID.to_string(),
                constants::MENU_ID.to_string(),
                constants::PAGE_NUMBER.to_string(),
            ],
            dimension_columns: vec![
                constants::FULL_HEIGHT.to_string(),
                constants::FULL_WIDTH.to_string(),
            ],
            text_columns: vec![constants::IMAGE_ID.to_string(), constants::UUID.to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub file_prefix: String,
    /// Write the rolling log file as JSON lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file_prefix: "menu_cleaner.log".to_string(),
            json: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Where to dump Prometheus text at exit; metrics are not recorded when unset
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, `$MENU_CLEANER_CONFIG`, or
    /// `config.toml`. Falls back to defaults when no file is found and none
    /// was requested explicitly.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::from_file(default_path);
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CleanerError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn menu_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.paths.input_dir.join(&self.menu.file),
            self.paths.output_dir.join(&self.menu.output),
        )
    }

    pub fn menu_item_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.paths.input_dir.join(&self.menu_item.file),
            self.paths.output_dir.join(&self.menu_item.output),
        )
    }

    pub fn menu_page_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.paths.input_dir.join(&self.menu_page.file),
            self.paths.output_dir.join(&self.menu_page.output),
        )
    }
}
