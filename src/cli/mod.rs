//! Command-line interface for frontplate.
//!
//! # Commands
//!
//! - `new` - Create a note from a template
//! - `insert` - Insert a template into an existing note, merging frontmatter
//! - `list` - List the available templates
//! - `resolve` - Show which file a template name resolves to
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - No logging
//! - `--config` / `-c` - Configuration file (also `FRONTPLATE_CONFIG`)
//! - `--vault` - Vault root; relative note paths and `templates_dir` are resolved
//!   against it (defaults to the current directory)
//!
//! # Examples
//!
//! ```bash
//! frontplate list
//! frontplate new daily journal/2024-05-01.md --tag journal
//! frontplate insert checklist projects/trip.md --line 5
//! frontplate --vault ~/notes resolve meeting
//! ```

pub mod common;
mod insert;
mod list;
mod new;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::CONFIG_ENV_VAR;
use common::CommandContext;

/// Markdown templates with frontmatter merging.
#[derive(Parser, Debug)]
#[command(name = "frontplate", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Vault root directory
    #[arg(long, global = true, value_name = "DIR")]
    vault: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    New(new::NewCommand),

    Insert(insert::InsertCommand),

    List(list::ListCommand),

    Resolve(resolve::ResolveCommand),
}

impl Cli {
    /// Log filter selected by the verbosity flags, or `None` to disable logging.
    ///
    /// `RUST_LOG` is honoured when neither flag is given.
    #[must_use]
    pub fn log_filter(&self) -> Option<EnvFilter> {
        if self.quiet {
            None
        } else if self.verbose {
            Some(EnvFilter::new("frontplate=debug"))
        } else {
            Some(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        }
    }

    /// Install the stderr log subscriber.
    pub fn init_logging(&self) {
        let Some(filter) = self.log_filter() else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Run the selected command.
    pub fn execute(self) -> Result<()> {
        let ctx = CommandContext::load(self.config, self.vault)?;

        match self.command {
            Commands::New(cmd) => cmd.execute(&ctx),
            Commands::Insert(cmd) => cmd.execute(&ctx),
            Commands::List(cmd) => cmd.execute(&ctx),
            Commands::Resolve(cmd) => cmd.execute(&ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "frontplate", "new", "daily", "journal/today.md", "--tag", "a", "--tag", "b",
            "--alias", "Today", "--title", "Today",
        ])
        .unwrap();

        match cli.command {
            Commands::New(cmd) => {
                assert_eq!(cmd.template, "daily");
                assert_eq!(cmd.tags, vec!["a", "b"]);
                assert_eq!(cmd.aliases, vec!["Today"]);
                assert_eq!(cmd.title.as_deref(), Some("Today"));
            }
            other => panic!("expected new, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["frontplate", "list", "--vault", "/notes", "-q"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.vault, Some(PathBuf::from("/notes")));
        assert!(cli.log_filter().is_none());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["frontplate", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn test_insert_line_flag() {
        let cli = Cli::try_parse_from(["frontplate", "insert", "t", "n.md", "--line", "3"]).unwrap();
        match cli.command {
            Commands::Insert(cmd) => assert_eq!(cmd.line, Some(3)),
            other => panic!("expected insert, got {other:?}"),
        }
    }
}
