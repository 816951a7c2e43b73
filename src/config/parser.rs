//! TOML parsing with path-aware errors.
//!
//! Read failures surface as [`FrontplateError::ReadError`] and syntax or schema
//! problems as [`FrontplateError::ConfigError`], both naming the offending file.

use std::path::Path;

use crate::core::{FileOperation, FrontplateError, IoResultExt, Result};

/// Parse a TOML file into any deserializable type.
///
/// ```rust,no_run
/// use frontplate::config::parse_config;
/// use serde::Deserialize;
/// use std::path::Path;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     name: String,
/// }
///
/// let settings: Settings = parse_config(Path::new("settings.toml"))?;
/// # Ok::<(), frontplate::core::FrontplateError>(())
/// ```
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path).with_path(FileOperation::Read, path)?;

    toml::from_str(&content).map_err(|e| FrontplateError::ConfigError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}
