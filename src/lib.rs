//! frontplate - markdown templates with frontmatter merging
//!
//! Templates are ordinary markdown files containing `{{name}}` placeholders and an
//! optional leading YAML frontmatter block. frontplate expands them into new notes, or
//! splices them into existing notes while merging the template's frontmatter into the
//! note's own.
//!
//! # Architecture Overview
//!
//! The engine is synchronous and talks to its surroundings through small traits, so an
//! editor integration can supply its own buffer, parser or prompt:
//!
//! | Concern | Trait | Default |
//! |---------|-------|---------|
//! | Templates directory | [`templating::TemplatesDirProvider`] | [`config::Config`] |
//! | Document parsing | [`markdown::NoteParser`] | [`markdown::MarkdownParser`] |
//! | Open document | [`buffer::LineBuffer`] | [`buffer::MemoryBuffer`] |
//! | Unknown placeholders | [`prompt::Prompt`] | [`prompt::StdinPrompt`] |
//!
//! # Core Modules
//!
//! - [`templating`] - Template lookup, placeholder expansion, clone and insert
//! - [`markdown`] - Note model, frontmatter splitting and merging
//! - [`buffer`] - Line-addressed document buffers
//! - [`prompt`] - Interactive values for unknown placeholders
//! - [`config`] - User configuration (`~/.frontplate/config.toml`)
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `frontplate` command-line interface
//!
//! # Template Format
//!
//! ```markdown
//! ---
//! tags: [meeting]
//! attendees: {{attendees}}
//! ---
//! # {{title}}
//!
//! Date: {{date}} {{time}}
//! ```
//!
//! Inserted into an existing note, the `tags` are added to the note's tags, the
//! `attendees` key is set (after prompting for a value), and the body lands at the
//! requested line.
//!
//! # Example
//!
//! ```rust,no_run
//! use frontplate::buffer::MemoryBuffer;
//! use frontplate::config::Config;
//! use frontplate::markdown::{MarkdownParser, NoteParser};
//! use frontplate::prompt::StdinPrompt;
//! use frontplate::templating::TemplateEngine;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load()?.with_vault("/home/sam/notes");
//! let engine = TemplateEngine::new(&config, config.settings(), MarkdownParser);
//!
//! let path = Path::new("/home/sam/notes/trip.md");
//! let mut buffer = MemoryBuffer::load(path)?;
//! let mut note = engine.parser().from_buffer(&buffer, Some(path))?;
//! engine.insert_template("checklist", &mut note, &mut buffer, 3, &mut StdinPrompt::new())?;
//! buffer.save(path)?;
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod cli;
pub mod config;
pub mod core;
pub mod markdown;
pub mod prompt;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
