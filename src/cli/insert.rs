//! Insert a template into an existing note.
//!
//! ```bash
//! frontplate insert checklist projects/trip.md            # append at the end
//! frontplate insert checklist projects/trip.md --line 12  # before line 12 (1-based)
//! ```
//!
//! A template with frontmatter has its metadata, tags and aliases merged into the
//! note's own frontmatter block; the body is spliced in at the requested line.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::CommandContext;
use crate::buffer::{LineBuffer, MemoryBuffer};
use crate::core::{FileOperation, IoResultExt};
use crate::markdown::NoteParser;
use crate::prompt::StdinPrompt;

/// Insert a template into a note
#[derive(Args, Debug)]
pub struct InsertCommand {
    /// Template name or path
    pub template: String,

    /// Note to insert into, relative to the vault root. Created if missing.
    pub file: PathBuf,

    /// Insert before this 1-based line instead of appending
    #[arg(long, short = 'l', value_name = "N")]
    pub line: Option<usize>,
}

impl InsertCommand {
    /// Execute the command
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let path = ctx.note_path(&self.file);
        let engine = ctx.engine();

        let mut buffer = MemoryBuffer::load(&path)?;
        let mut target = engine.parser().from_buffer(&buffer, Some(&path))?;

        let insertion_point = self.insertion_point(buffer.line_count());
        let insertion = engine.insert_template(
            &self.template,
            &mut target,
            &mut buffer,
            insertion_point,
            &mut StdinPrompt::new(),
        )?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path(FileOperation::CreateDir, parent)?;
        }
        buffer.save(&path)?;

        let merged = if insertion.frontmatter_merged {
            " (frontmatter merged)"
        } else {
            ""
        };
        println!(
            "{} {} lines into {} at line {}{}",
            "Inserted".green().bold(),
            insertion.inserted.len(),
            path.display(),
            insertion.inserted.start + 1,
            merged
        );
        Ok(())
    }

    /// 0-based insertion point for a buffer of `line_count` lines.
    fn insertion_point(&self, line_count: usize) -> usize {
        match self.line {
            Some(line) => line.saturating_sub(1),
            None => line_count,
        }
    }
}
