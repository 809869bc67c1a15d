//! Configuration loading, validation, and management for promptsmith.
//!
//! Loads configuration from `~/.promptsmith/config.toml` with environment
//! variable overrides, and resolves which technique catalog to load.
//! Validates all settings at startup.

use promptsmith_core::{Catalog, CatalogError, PackingStrategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.promptsmith/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the technique catalog comes from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Overrides applied on top of the catalog's selection rules
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// CLI output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (TOML, or JSON when the extension is `.json`).
    /// Defaults to `~/.promptsmith/catalog.toml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Use the built-in catalog when the file does not exist
    #[serde(default = "default_true")]
    pub builtin_fallback: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            builtin_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_techniques: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packing: Option<PackingStrategy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// "text" or "json"
    #[serde(default = "default_output_format")]
    pub format: String,

    #[serde(default = "default_true")]
    pub show_reasoning: bool,
}

fn default_output_format() -> String {
    "text".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            show_reasoning: true,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

impl AppConfig {
    /// Load configuration from the default path (~/.promptsmith/config.toml).
    ///
    /// Environment variables override the file:
    /// - `PROMPTSMITH_CATALOG` — catalog file path
    /// - `PROMPTSMITH_LOG` — log level
    /// - `PROMPTSMITH_OUTPUT` — output format
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("PROMPTSMITH_CATALOG") {
            self.catalog.path = Some(path);
        }
        if let Some(level) = lookup("PROMPTSMITH_LOG") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PROMPTSMITH_OUTPUT") {
            self.output.format = format;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".promptsmith")
    }

    /// The catalog file this configuration points at.
    pub fn catalog_path(&self) -> PathBuf {
        match &self.catalog.path {
            Some(path) => expand_home(path),
            None => Self::config_dir().join("catalog.toml"),
        }
    }

    /// Resolve, load and validate the technique catalog, then apply the
    /// `[selection]` overrides.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let path = self.catalog_path();
        let mut catalog = if path.exists() {
            Catalog::from_path(&path)?
        } else if self.catalog.builtin_fallback {
            tracing::info!(
                "No catalog found at {}, using built-in catalog",
                path.display()
            );
            Catalog::builtin()?
        } else {
            return Err(ConfigError::ValidationError(format!(
                "catalog file {} does not exist and builtin_fallback is disabled",
                path.display()
            )));
        };

        let rules = &mut catalog.selection_rules;
        if let Some(max) = self.selection.max_techniques {
            rules.max_techniques = max;
        }
        if let Some(min) = self.selection.min_confidence {
            rules.min_confidence = min;
        }
        if let Some(packing) = self.selection.packing {
            rules.packing = packing;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(min) = self.selection.min_confidence {
            if !(0.0..=1.0).contains(&min) {
                return Err(ConfigError::ValidationError(
                    "selection.min_confidence must be between 0.0 and 1.0".into(),
                ));
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }

        if !OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be 'text' or 'json', got '{}'",
                self.output.format
            )));
        }

        Ok(())
    }

    pub fn json_output(&self) -> bool {
        self.output.format == "json"
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs_home().join(rest),
        None => PathBuf::from(path),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
