//! Template expansion for markdown notes.
//!
//! A template is a plain markdown file with `{{name}}` placeholders and an optional
//! leading frontmatter block. This module finds templates, expands their placeholders
//! and writes the result either into a new note or into an open document.
//!
//! # Overview
//!
//! - [`locator`]: maps a template name or path to a file
//! - [`context`]: the per-document table of placeholder values
//! - [`renderer`]: single-pass placeholder expansion with prompting for unknowns
//! - [`assembler`]: the clone and insert operations
//!
//! # Placeholders
//!
//! | Placeholder | Value |
//! |-------------|-------|
//! | `{{date}}` | Current date, `date_format` (default `%Y-%m-%d`) |
//! | `{{time}}` | Current time, `time_format` (default `%H:%M`) |
//! | `{{title}}` | The note's title, or its display name |
//! | `{{id}}` | The note's identifier, when it has one |
//! | `{{path}}` | The note's path, when it has one |
//! | anything else | A configured substitution, or a prompted value |
//!
//! Configured substitutions take precedence over the built-ins. A placeholder nobody
//! answers for stays in the output verbatim.
//!
//! # Examples
//!
//! ```rust,no_run
//! use frontplate::markdown::{MarkdownParser, Note};
//! use frontplate::prompt::StdinPrompt;
//! use frontplate::templating::{TemplateEngine, TemplateSettings};
//! use std::path::{Path, PathBuf};
//!
//! let engine = TemplateEngine::new(
//!     &PathBuf::from("vault/templates"),
//!     TemplateSettings::default(),
//!     MarkdownParser,
//! );
//!
//! let mut source = Note::new("2024-trip");
//! source.title = Some("Trip".to_string());
//!
//! let note = engine.clone_template(
//!     "travel",
//!     Path::new("vault/notes/2024-trip.md"),
//!     &source,
//!     &mut StdinPrompt::new(),
//! )?;
//! note.save(Path::new("vault/notes/2024-trip.md"))?;
//! # Ok::<(), frontplate::core::FrontplateError>(())
//! ```

pub mod assembler;
pub mod context;
pub mod locator;
pub mod renderer;

pub use assembler::{Insertion, TemplateEngine};
pub use context::{
    DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, Substitution, SubstitutionContext, TemplateSettings,
};
pub use locator::{TemplatesDirProvider, list_templates, resolve_template};
pub use renderer::expand;
