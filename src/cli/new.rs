//! Create a new note from a template.
//!
//! ```bash
//! frontplate new daily journal/2024-05-01.md
//! frontplate new meeting work/standup.md --title "Standup" --tag work --alias "Daily standup"
//! ```
//!
//! The destination is written with every placeholder expanded, then rewritten with the
//! identity given on the command line (`--id`, `--title`, `--alias`, `--tag`) merged in.
//! A `--title` is kept as a `# ` heading, added at the top of the body when the
//! template produced none.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::common::CommandContext;
use crate::markdown::Note;
use crate::prompt::StdinPrompt;

/// Create a note from a template
#[derive(Args, Debug)]
pub struct NewCommand {
    /// Template name or path
    pub template: String,

    /// Destination file, relative to the vault root
    pub destination: PathBuf,

    /// Title for `{{title}}`, added as a `# ` heading if the template has none
    #[arg(long)]
    pub title: Option<String>,

    /// Identifier for `{{id}}` and the note (defaults to the file stem)
    #[arg(long)]
    pub id: Option<String>,

    /// Alias to add (repeatable)
    #[arg(long = "alias", value_name = "ALIAS")]
    pub aliases: Vec<String>,

    /// Tag to add (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Overwrite the destination if it already exists
    #[arg(long)]
    pub force: bool,
}

impl NewCommand {
    /// Execute the command
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let destination = ctx.note_path(&self.destination);
        if destination.exists() && !self.force {
            anyhow::bail!(
                "{} already exists. Use --force to overwrite it.",
                destination.display()
            );
        }

        let source = self.source_note(&destination);
        let mut note = ctx.engine().clone_template(
            &self.template,
            &destination,
            &source,
            &mut StdinPrompt::new(),
        )?;
        if let Some(title) = &self.title {
            ensure_heading(&mut note, title);
        }
        note.save(&destination)?;

        println!("{} {}", "Created".green().bold(), destination.display());
        Ok(())
    }

    /// The note whose fields seed the template's placeholders.
    fn source_note(&self, destination: &Path) -> Note {
        let mut note = Note {
            id: self.id.clone().or_else(|| {
                destination.file_stem().map(|stem| stem.to_string_lossy().into_owned())
            }),
            title: self.title.clone(),
            path: Some(destination.to_path_buf()),
            ..Default::default()
        };
        for alias in &self.aliases {
            note.add_alias(alias.clone());
        }
        for tag in &self.tags {
            note.add_tag(tag.clone());
        }
        note
    }
}

/// Put `# title` at the top of the body unless the note already has a heading.
fn ensure_heading(note: &mut Note, title: &str) {
    if note.body.iter().any(|line| line.starts_with("# ")) {
        return;
    }
    note.body.insert(0, format!("# {title}"));
}
