//! Line-addressed document buffers.
//!
//! The insert operation edits an open document through [`LineBuffer`] rather than
//! touching files directly, so an editor integration can plug in its own buffer type.
//! [`MemoryBuffer`] is the implementation used by the command-line front end and the
//! tests: it holds the lines in memory and can be loaded from and saved to a file.
//!
//! Line ranges are 0-based and end-exclusive, like slice ranges.

use std::path::Path;

use crate::core::{FileOperation, IoResultExt, Result};

/// An open document the engine can read and splice.
pub trait LineBuffer {
    /// Number of lines currently in the buffer.
    fn line_count(&self) -> usize;

    /// Lines in `start..end`, clamped to the buffer length.
    fn get_lines(&self, start: usize, end: usize) -> Vec<String>;

    /// Replace the lines in `start..end` with `new_lines`. `start == end` inserts.
    fn replace_lines(&mut self, start: usize, end: usize, new_lines: Vec<String>);

    /// Move the cursor to `line`. Buffers without a cursor ignore this.
    fn set_cursor(&mut self, _line: usize) {}

    /// Redraw whatever displays the buffer. Buffers without a display ignore this.
    fn refresh(&mut self) {}
}

/// A [`LineBuffer`] backed by a `Vec<String>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBuffer {
    lines: Vec<String>,
    cursor: usize,
}

impl MemoryBuffer {
    /// Create a buffer holding `lines`.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    /// Load a buffer from a file. A missing file yields an empty buffer.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("{} does not exist yet, starting with an empty buffer", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).with_path(FileOperation::Read, path)?;
        Ok(Self::new(text.lines()))
    }

    /// Write the buffer to a file, one line per buffer line.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut text = self.lines.join("\n");
        if !self.lines.is_empty() {
            text.push('\n');
        }
        std::fs::write(path, text).with_path(FileOperation::Write, path)
    }

    /// All lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Current cursor line.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl LineBuffer for MemoryBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn get_lines(&self, start: usize, end: usize) -> Vec<String> {
        let end = end.min(self.lines.len());
        let start = start.min(end);
        self.lines[start..end].to_vec()
    }

    fn replace_lines(&mut self, start: usize, end: usize, new_lines: Vec<String>) {
        let end = end.min(self.lines.len());
        let start = start.min(end);
        self.lines.splice(start..end, new_lines);
    }

    fn set_cursor(&mut self, line: usize) {
        self.cursor = line.min(self.lines.len());
    }
}
