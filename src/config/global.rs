//! User configuration file.
//!
//! Settings live in `~/.frontplate/config.toml`. The location can be overridden with
//! the `FRONTPLATE_CONFIG` environment variable or the `--config` flag. A missing file
//! is not an error: every field has a default.
//!
//! ```toml
//! templates_dir = "~/notes/templates"
//! date_format = "%A, %d %B %Y"
//! time_format = "%H:%M"
//!
//! [substitutions]
//! author = "Sam"
//! project = "Lisbon"
//! ```
//!
//! `templates_dir` goes through tilde and environment-variable expansion. A relative
//! result is taken relative to the vault root (see [`Config::with_vault`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::parse_config;
use crate::core::{FileOperation, FrontplateError, IoResultExt, Result};
use crate::templating::{
    DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, TemplateSettings, TemplatesDirProvider,
};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "FRONTPLATE_CONFIG";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn is_default_date_format(format: &str) -> bool {
    format == DEFAULT_DATE_FORMAT
}

fn is_default_time_format(format: &str) -> bool {
    format == DEFAULT_TIME_FORMAT
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Where templates are looked up. Unset means only explicit template paths work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,

    /// strftime format for `{{date}}`.
    #[serde(default = "default_date_format", skip_serializing_if = "is_default_date_format")]
    pub date_format: String,

    /// strftime format for `{{time}}`.
    #[serde(default = "default_time_format", skip_serializing_if = "is_default_time_format")]
    pub time_format: String,

    /// Literal placeholder values. These shadow the built-in placeholders.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub substitutions: BTreeMap<String, String>,

    /// Base for a relative `templates_dir`. Not stored in the file.
    #[serde(skip)]
    vault_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: None,
            date_format: default_date_format(),
            time_format: default_time_format(),
            substitutions: BTreeMap::new(),
            vault_root: None,
        }
    }
}

impl Config {
    /// Load from the default location, or defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_with_optional(None)
    }

    /// Load from `path` when given, otherwise from [`Config::default_path`].
    pub fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Self = parse_config(path)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_path(FileOperation::CreateDir, parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| FrontplateError::ConfigError {
            path: path.to_path_buf(),
            message: format!("failed to serialize configuration: {e}"),
        })?;

        std::fs::write(path, content).with_path(FileOperation::Write, path)
    }

    /// Configuration file location: `$FRONTPLATE_CONFIG`, else `~/.frontplate/config.toml`.
    ///
    /// # Errors
    ///
    /// [`FrontplateError::ConfigError`] when the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir().ok_or_else(|| FrontplateError::ConfigError {
            path: PathBuf::from("~/.frontplate/config.toml"),
            message: "unable to determine home directory".to_string(),
        })?;

        Ok(home.join(".frontplate").join("config.toml"))
    }

    /// Resolve a relative `templates_dir` against `root`.
    #[must_use]
    pub fn with_vault(mut self, root: impl Into<PathBuf>) -> Self {
        self.vault_root = Some(root.into());
        self
    }

    /// The vault root, if one was set.
    #[must_use]
    pub fn vault_root(&self) -> Option<&Path> {
        self.vault_root.as_deref()
    }

    /// Expanded and anchored templates directory.
    #[must_use]
    pub fn templates_path(&self) -> Option<PathBuf> {
        let raw = self.templates_dir.as_deref()?;

        let expanded = match shellexpand::full(raw) {
            Ok(expanded) => expanded.into_owned(),
            Err(e) => {
                tracing::warn!("Could not expand templates_dir '{}': {}", raw, e);
                raw.to_string()
            }
        };

        let path = PathBuf::from(expanded);
        match &self.vault_root {
            Some(root) if path.is_relative() => Some(root.join(path)),
            _ => Some(path),
        }
    }

    /// Settings handed to the template engine.
    #[must_use]
    pub fn settings(&self) -> TemplateSettings {
        TemplateSettings {
            date_format: self.date_format.clone(),
            time_format: self.time_format.clone(),
            substitutions: self.substitutions.clone(),
        }
    }
}

impl TemplatesDirProvider for Config {
    fn templates_dir(&self) -> Option<PathBuf> {
        self.templates_path()
    }
}
