//! Materializing templates into documents.
//!
//! [`TemplateEngine`] ties the locator, the resolver and the merger together:
//!
//! - [`TemplateEngine::clone_template`] writes a brand-new document from a template.
//! - [`TemplateEngine::insert_template`] splices a template into an open buffer, merging
//!   the template's frontmatter into the target's own block.
//!
//! Each call builds its own [`SubstitutionContext`], so memoized values and prompt
//! answers never leak from one document into the next.

use regex::Regex;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::context::{SubstitutionContext, TemplateSettings};
use super::locator::{TemplatesDirProvider, resolve_template};
use super::renderer::expand;
use crate::buffer::LineBuffer;
use crate::core::{FileOperation, IoResultExt, Result};
use crate::markdown::frontmatter::{Leading, LineCursor, take_frontmatter};
use crate::markdown::{MarkdownParser, Note, NoteParser, merge_frontmatter};
use crate::prompt::Prompt;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is a valid regex"));

/// Outcome of [`TemplateEngine::insert_template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Whether the template carried frontmatter that was merged into the target.
    pub frontmatter_merged: bool,
    /// Buffer lines holding the inserted body, after any frontmatter shift.
    pub inserted: Range<usize>,
}

/// Clones and inserts templates.
///
/// # Examples
///
/// ```rust,no_run
/// use frontplate::buffer::MemoryBuffer;
/// use frontplate::markdown::{MarkdownParser, Note};
/// use frontplate::prompt::StdinPrompt;
/// use frontplate::templating::{TemplateEngine, TemplateSettings};
/// use std::path::PathBuf;
///
/// let engine = TemplateEngine::new(
///     &PathBuf::from("vault/templates"),
///     TemplateSettings::default(),
///     MarkdownParser,
/// );
///
/// let mut note = Note::new("today");
/// let mut buffer = MemoryBuffer::new(["# Today"]);
/// engine.insert_template("daily", &mut note, &mut buffer, 1, &mut StdinPrompt::new())?;
/// # Ok::<(), frontplate::core::FrontplateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TemplateEngine<P = MarkdownParser> {
    templates_dir: Option<PathBuf>,
    settings: TemplateSettings,
    parser: P,
}

impl<P: NoteParser> TemplateEngine<P> {
    /// Create an engine. The templates directory is read from `provider` once, here.
    pub fn new(provider: &dyn TemplatesDirProvider, settings: TemplateSettings, parser: P) -> Self {
        Self {
            templates_dir: provider.templates_dir(),
            settings,
            parser,
        }
    }

    /// The configured templates directory.
    #[must_use]
    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    /// The document parser used for targets and template frontmatter.
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Resolve a template reference against the configured directory.
    pub fn resolve(&self, template_ref: &str) -> Result<PathBuf> {
        resolve_template(template_ref, self.templates_dir())
    }

    /// Create `destination` from a template, seeding placeholders from `source`.
    ///
    /// Every template line, frontmatter included, is expanded and written as it is
    /// read. The written file is then parsed back and the source's identity is
    /// transferred onto the result: `id` (when the source has one), the title when the
    /// new note has none, and the source's aliases and tags.
    ///
    /// The returned note is not written back; call [`Note::save`] to persist the
    /// transferred fields.
    ///
    /// # Errors
    ///
    /// Resolution, read, write and parse failures. A destination that was partially
    /// written when the error occurred is left in place.
    pub fn clone_template(
        &self,
        template_ref: &str,
        destination: &Path,
        source: &Note,
        prompt: &mut dyn Prompt,
    ) -> Result<Note> {
        let template_path = self.resolve(template_ref)?;

        if is_same_file(&template_path, destination) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("destination is the template {} itself", template_path.display()),
            ))
            .with_path(FileOperation::Write, destination);
        }

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_path(FileOperation::CreateDir, parent)?;
        }

        {
            let reader = File::open(&template_path).with_path(FileOperation::Read, &template_path)?;
            let cursor = LineCursor::from_reader(BufReader::new(reader), &template_path);

            let out = File::create(destination).with_path(FileOperation::Write, destination)?;
            let mut writer = BufWriter::new(out);

            let mut ctx = SubstitutionContext::for_note(source, &self.settings);
            for line in cursor {
                let expanded = expand(&line?, &mut ctx, prompt);
                writeln!(writer, "{expanded}").with_path(FileOperation::Write, destination)?;
            }
            writer.flush().with_path(FileOperation::Write, destination)?;
        }

        tracing::debug!(
            "Cloned template {} into {}",
            template_path.display(),
            destination.display()
        );

        let mut note = self.parser.from_path(destination)?;
        if let Some(id) = &source.id {
            note.id = Some(id.clone());
        }
        if note.title.is_none() {
            note.title.clone_from(&source.title);
        }
        for alias in &source.aliases {
            note.add_alias(alias.clone());
        }
        for tag in &source.tags {
            note.add_tag(tag.clone());
        }

        Ok(note)
    }

    /// Insert a template into `buffer` at line `insertion_point`.
    ///
    /// When the template starts with a frontmatter block, that block is merged into
    /// `target` and the buffer's frontmatter is replaced with the target's regenerated
    /// block (or a new block is added at the top when the target had none). The body
    /// is expanded and spliced at the insertion point, clamped to the buffer length and
    /// shifted by however many lines the frontmatter grew or shrank. An insertion point
    /// inside the old block lands just after the new one.
    ///
    /// `target` must describe the buffer's current contents, in particular
    /// `has_frontmatter` and `frontmatter_end_line`. Both are updated on success.
    ///
    /// # Errors
    ///
    /// Resolution, read and frontmatter errors. The template is read in full and its
    /// frontmatter parsed before anything is modified, so on error neither `target` nor
    /// `buffer` has changed.
    pub fn insert_template(
        &self,
        template_ref: &str,
        target: &mut Note,
        buffer: &mut dyn LineBuffer,
        insertion_point: usize,
        prompt: &mut dyn Prompt,
    ) -> Result<Insertion> {
        let template_path = self.resolve(template_ref)?;
        let reader = File::open(&template_path).with_path(FileOperation::Read, &template_path)?;
        let mut cursor = LineCursor::from_reader(BufReader::new(reader), &template_path);

        let (template_frontmatter, mut raw_body): (Option<Vec<String>>, Vec<String>) =
            match take_frontmatter(&mut cursor)? {
                Leading::Frontmatter(block) => (Some(block), Vec::new()),
                Leading::Body(first) => (None, first.into_iter().collect()),
            };
        for line in cursor {
            raw_body.push(line?);
        }

        let mut ctx = SubstitutionContext::for_note(target, &self.settings);
        let mut point = insertion_point.min(buffer.line_count());
        let frontmatter_merged = template_frontmatter.is_some();

        if let Some(block) = template_frontmatter {
            let new_block =
                merge_frontmatter(&block, &template_path, target, &self.parser, &mut ctx, prompt)?;

            let old_len = match target.frontmatter_end_line {
                Some(end) if target.has_frontmatter => (end + 1).min(buffer.line_count()),
                _ => 0,
            };
            let new_len = new_block.len();

            buffer.replace_lines(0, old_len, new_block);
            target.has_frontmatter = true;
            target.frontmatter_end_line = Some(new_len - 1);

            point = if point < old_len {
                new_len
            } else {
                point - old_len + new_len
            };
            tracing::debug!(
                "Replaced {} frontmatter lines with {}, inserting at line {}",
                old_len,
                new_len,
                point
            );
        }

        let mut body = Vec::with_capacity(raw_body.len());
        for line in &raw_body {
            body.extend(split_lines(&expand(line, &mut ctx, prompt)));
        }

        let inserted = point..point + body.len();
        buffer.replace_lines(point, point, body);
        buffer.set_cursor(inserted.end.saturating_sub(1).max(point));
        buffer.refresh();

        tracing::debug!(
            "Inserted {} lines from {} at line {}",
            inserted.len(),
            template_path.display(),
            point
        );

        Ok(Insertion {
            frontmatter_merged,
            inserted,
        })
    }
}

/// Whether both paths name the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Split expanded text on any line terminator. A terminator at the very end adds no
/// empty line; every other fragment is kept.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = LINE_BREAK.split(text).map(str::to_string).collect();
    if lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}
