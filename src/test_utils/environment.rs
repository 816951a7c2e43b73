//! Temporary vault for library and integration tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::Config;
use crate::markdown::MarkdownParser;
use crate::templating::TemplateEngine;

/// A vault in a temporary directory.
///
/// Layout:
///
/// ```text
/// <tmp>/config.toml        templates_dir = "templates"
/// <tmp>/vault/
/// <tmp>/vault/templates/
/// ```
pub struct TestVault {
    pub temp_dir: TempDir,
    pub vault_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub config_path: PathBuf,
}

impl TestVault {
    /// Create an empty vault with a templates directory and a config pointing at it.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let vault_dir = temp_dir.path().join("vault");
        let templates_dir = vault_dir.join("templates");
        let config_path = temp_dir.path().join("config.toml");

        fs::create_dir_all(&templates_dir)?;
        fs::write(&config_path, "templates_dir = \"templates\"\n")?;

        Ok(Self {
            temp_dir,
            vault_dir,
            templates_dir,
            config_path,
        })
    }

    /// Replace the config file contents.
    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Add a template, creating subdirectories as needed.
    pub fn add_template(&self, name: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        write_with_parents(&self.templates_dir.join(name), content)
    }

    /// Create a file in the vault.
    pub fn create_file(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        write_with_parents(&self.vault_dir.join(path), content)
    }

    /// Read a file from the vault.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(fs::read_to_string(self.vault_dir.join(path))?)
    }

    /// Check if a file exists in the vault.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.vault_dir.join(path).exists()
    }

    /// Get the vault directory path
    #[must_use]
    pub fn vault_path(&self) -> &Path {
        &self.vault_dir
    }

    /// The vault's configuration, anchored at the vault root.
    pub fn config(&self) -> Result<Config> {
        Ok(Config::load_from(&self.config_path)?.with_vault(&self.vault_dir))
    }

    /// An engine over the vault's templates directory with default settings.
    #[must_use]
    pub fn engine(&self) -> TemplateEngine {
        TemplateEngine::new(&self.templates_dir, Default::default(), MarkdownParser)
    }
}

fn write_with_parents(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(path.to_path_buf())
}
