//! Markdown notes with YAML frontmatter.
//!
//! This module provides the document model the template engine works on, plus the
//! default parser that builds it from lines, files and open buffers.
//!
//! # Note Structure
//!
//! A [`Note`] is split into identity fields and free-form metadata:
//!
//! ```markdown
//! ---
//! id: 2024-trip
//! aliases:
//!   - Lisbon trip
//! tags:
//!   - travel
//! budget: 1200
//! ---
//!
//! # Trip
//!
//! Packing list...
//! ```
//!
//! | Key | Field | Semantics |
//! |-----|-------|-----------|
//! | `id` | [`Note::id`] | Identifier, defaults to the file stem |
//! | `aliases` | [`Note::aliases`] | Ordered, unique |
//! | `tags` | [`Note::tags`] | Set, rendered sorted |
//! | anything else | [`Note::metadata`] | Insertion ordered, opaque values |
//!
//! The title is not stored in frontmatter. It comes from the first level-1 heading.
//!
//! # Parsing
//!
//! The engine never parses YAML itself. It goes through the [`NoteParser`] trait;
//! [`MarkdownParser`] is the implementation used by the command-line front end.

pub mod frontmatter;
pub mod merge;

use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::buffer::LineBuffer;
use crate::core::{FileOperation, FrontplateError, IoResultExt, Result};
use frontmatter::{FRONTMATTER_DELIMITER, LineCursor};

pub use merge::merge_frontmatter;

/// Frontmatter keys that map onto dedicated [`Note`] fields.
const ID_KEY: &str = "id";
const ALIASES_KEY: &str = "aliases";
const TAGS_KEY: &str = "tags";

/// A markdown note as seen by the template engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    /// Identifier. Absent when neither frontmatter nor a file path provides one.
    pub id: Option<String>,

    /// Explicit title, taken from the first `# ` heading.
    pub title: Option<String>,

    /// Location on disk, when the note has one.
    pub path: Option<PathBuf>,

    /// Alternative names, unique and in insertion order.
    pub aliases: Vec<String>,

    /// Tags. Only membership matters.
    pub tags: BTreeSet<String>,

    /// Every other frontmatter key, in the order first seen.
    pub metadata: Mapping,

    /// Whether the source started with a frontmatter block.
    pub has_frontmatter: bool,

    /// 0-based line index of the closing delimiter in the source.
    pub frontmatter_end_line: Option<usize>,

    /// Lines after the frontmatter block.
    pub body: Vec<String>,
}

impl Note {
    /// Create an empty note with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Add a tag. Returns false if it was already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Add an alias at the end of the list. Returns false if it was already present.
    pub fn add_alias(&mut self, alias: impl Into<String>) -> bool {
        let alias = alias.into();
        if self.aliases.contains(&alias) {
            return false;
        }
        self.aliases.push(alias);
        true
    }

    /// Name to show for the note: title, else first alias, else id, else file stem.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        if let Some(alias) = self.aliases.first() {
            return alias.clone();
        }
        if let Some(id) = &self.id {
            return id.clone();
        }
        self.path
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Canonical frontmatter mapping: `id`, `aliases`, `tags`, then metadata.
    #[must_use]
    pub fn frontmatter(&self) -> Mapping {
        let mut map = Mapping::new();
        if let Some(id) = &self.id {
            map.insert(ID_KEY.into(), Value::String(id.clone()));
        }
        if !self.aliases.is_empty() {
            map.insert(
                ALIASES_KEY.into(),
                Value::Sequence(self.aliases.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.tags.is_empty() {
            map.insert(
                TAGS_KEY.into(),
                Value::Sequence(self.tags.iter().cloned().map(Value::String).collect()),
            );
        }
        for (key, value) in &self.metadata {
            if !is_reserved_key(key) {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }

    /// Render the frontmatter block as lines.
    ///
    /// The result is a pure function of the note's current state, so it can be called
    /// again after a merge to get the replacement block.
    ///
    /// # Errors
    ///
    /// [`FrontplateError::MetadataParse`] if the metadata cannot be written as YAML.
    pub fn frontmatter_lines(&self, include_delimiters: bool) -> Result<Vec<String>> {
        let map = self.frontmatter();
        let mut lines = Vec::new();

        if include_delimiters {
            lines.push(FRONTMATTER_DELIMITER.to_string());
        }
        if !map.is_empty() {
            let yaml = serde_yaml::to_string(&map).map_err(|e| self.render_error(&e))?;
            lines.extend(yaml.lines().map(str::to_string));
        }
        if include_delimiters {
            lines.push(FRONTMATTER_DELIMITER.to_string());
        }

        Ok(lines)
    }

    fn render_error(&self, err: &serde_yaml::Error) -> FrontplateError {
        let origin = self.path.clone().unwrap_or_else(|| PathBuf::from(self.display_name()));
        tracing::warn!("Cannot render frontmatter of {}: {}", origin.display(), err);
        FrontplateError::MetadataParse {
            origin,
            reason: err.to_string(),
        }
    }

    /// The whole note as lines: frontmatter (when there is any to write) then body.
    pub fn to_lines(&self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        if self.has_frontmatter || !self.frontmatter().is_empty() {
            lines.extend(self.frontmatter_lines(true)?);
        }
        lines.extend(self.body.iter().cloned());
        Ok(lines)
    }

    /// Write the note to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_path(FileOperation::CreateDir, parent)?;
        }

        let mut text = self.to_lines()?.join("\n");
        text.push('\n');
        std::fs::write(path, text).with_path(FileOperation::Write, path)?;

        tracing::debug!("Saved note to {}", path.display());
        Ok(())
    }
}

fn is_reserved_key(key: &Value) -> bool {
    matches!(key.as_str(), Some(ID_KEY | ALIASES_KEY | TAGS_KEY))
}

/// Builds [`Note`]s from raw lines.
///
/// The engine uses this both for target documents and for a template's own
/// frontmatter, so a custom implementation controls how metadata is read everywhere.
pub trait NoteParser {
    /// Parse a note from its lines. `path` is recorded on the note and used in errors.
    fn from_lines(&self, lines: Vec<String>, path: Option<&Path>) -> Result<Note>;

    /// Read and parse a note from disk.
    fn from_path(&self, path: &Path) -> Result<Note> {
        let text = std::fs::read_to_string(path).with_path(FileOperation::Read, path)?;
        let lines = text.lines().map(str::to_string).collect();
        self.from_lines(lines, Some(path))
    }

    /// Parse the current contents of an open buffer.
    fn from_buffer(&self, buffer: &dyn LineBuffer, path: Option<&Path>) -> Result<Note> {
        let lines = buffer.get_lines(0, buffer.line_count());
        self.from_lines(lines, path)
    }
}

/// Default [`NoteParser`]: YAML frontmatter via `serde_yaml`, title from the first heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    /// Create a parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parse_metadata(interior: &[String], origin: &Path) -> Result<Mapping> {
        let text = interior.join("\n");
        let value: Value =
            serde_yaml::from_str(&text).map_err(|e| FrontplateError::MetadataParse {
                origin: origin.to_path_buf(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Null => Ok(Mapping::new()),
            Value::Mapping(map) => Ok(map),
            other => Err(FrontplateError::MetadataParse {
                origin: origin.to_path_buf(),
                reason: format!("expected a mapping of keys to values, found {other:?}"),
            }),
        }
    }
}

impl NoteParser for MarkdownParser {
    fn from_lines(&self, lines: Vec<String>, path: Option<&Path>) -> Result<Note> {
        let origin = path.map_or_else(|| PathBuf::from("<buffer>"), Path::to_path_buf);
        let parts = frontmatter::split(LineCursor::from_lines(lines, origin.clone()))?;

        let mut note = Note {
            path: path.map(Path::to_path_buf),
            has_frontmatter: parts.had_frontmatter,
            frontmatter_end_line: parts.closing_line(),
            ..Default::default()
        };

        if parts.had_frontmatter {
            for (key, value) in Self::parse_metadata(parts.interior(), &origin)? {
                match key.as_str() {
                    Some(ID_KEY) => note.id = yaml_scalar(&value),
                    Some(ALIASES_KEY) => {
                        for alias in yaml_string_list(&value) {
                            note.add_alias(alias);
                        }
                    }
                    Some(TAGS_KEY) => {
                        for tag in yaml_string_list(&value) {
                            note.add_tag(tag);
                        }
                    }
                    _ => {
                        note.metadata.insert(key, value);
                    }
                }
            }
        }

        note.title = parts
            .body
            .iter()
            .find_map(|line| line.strip_prefix("# "))
            .map(|heading| heading.trim().to_string());

        if note.id.is_none() {
            note.id = path.and_then(Path::file_stem).map(|stem| stem.to_string_lossy().into_owned());
        }

        note.body = parts.body;
        Ok(note)
    }
}

/// Read a scalar as a string. Sequences and mappings yield `None`.
fn yaml_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a list of strings, accepting a single scalar as a one-element list.
fn yaml_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(yaml_scalar).collect(),
        other => yaml_scalar(other).into_iter().collect(),
    }
}

/// Check if a path represents a Markdown file based on its extension.
///
/// ```rust
/// # use frontplate::markdown::is_markdown_file;
/// # use std::path::Path;
/// assert!(is_markdown_file(Path::new("daily.md")));
/// assert!(is_markdown_file(Path::new("README.MD")));
/// assert!(!is_markdown_file(Path::new("config.toml")));
/// ```
#[must_use]
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Recursively find all Markdown files in a directory.
///
/// Returns an empty list if the directory does not exist. Entries that cannot be read
/// are skipped with a warning.
pub fn list_markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if !dir.exists() {
        return files;
    }

    for entry in walkdir::WalkDir::new(dir).follow_links(true) {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && is_markdown_file(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => tracing::warn!("Skipping unreadable entry under {}: {}", dir.display(), e),
        }
    }

    files
}
