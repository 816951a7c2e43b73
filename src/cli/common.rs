//! Common context for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::markdown::MarkdownParser;
use crate::templating::{TemplateEngine, TemplatesDirProvider};

/// Configuration and vault location shared by every command.
#[derive(Debug)]
pub struct CommandContext {
    /// Loaded configuration, anchored at the vault root
    pub config: Config,
    /// Vault root directory
    pub vault_root: PathBuf,
}

impl CommandContext {
    /// Load the configuration and anchor it at `vault`, or the current directory.
    ///
    /// # Errors
    /// Returns an error if the configuration file exists but cannot be parsed, or if the
    /// current directory cannot be determined
    pub fn load(config_path: Option<PathBuf>, vault: Option<PathBuf>) -> Result<Self> {
        let vault_root = match vault {
            Some(vault) => vault,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let config = Config::load_with_optional(config_path)?.with_vault(&vault_root);
        tracing::debug!(
            "Vault root {}, templates dir {:?}",
            vault_root.display(),
            config.templates_dir()
        );

        Ok(Self {
            config,
            vault_root,
        })
    }

    /// Template engine over the configured templates directory.
    #[must_use]
    pub fn engine(&self) -> TemplateEngine {
        TemplateEngine::new(&self.config, self.config.settings(), MarkdownParser)
    }

    /// Resolve a note path given on the command line against the vault root.
    #[must_use]
    pub fn note_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.vault_root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_context_anchors_templates_dir_at_vault() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "templates_dir = \"tpl\"\n").unwrap();

        let ctx = CommandContext::load(Some(config_path), Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(ctx.config.templates_dir(), Some(temp.path().join("tpl")));
        assert_eq!(ctx.engine().templates_dir(), Some(temp.path().join("tpl").as_path()));
    }

    #[test]
    fn test_note_path() {
        let temp = tempdir().unwrap();
        let ctx = CommandContext::load(
            Some(temp.path().join("missing.toml")),
            Some(PathBuf::from("/vault")),
        )
        .unwrap();

        assert_eq!(ctx.note_path(Path::new("notes/a.md")), PathBuf::from("/vault/notes/a.md"));
        assert_eq!(ctx.note_path(Path::new("/tmp/b.md")), PathBuf::from("/tmp/b.md"));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "templates_dir = [").unwrap();

        let err = CommandContext::load(Some(config_path), Some(temp.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
