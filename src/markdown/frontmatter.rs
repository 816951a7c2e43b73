//! Frontmatter detection over single-pass line streams.
//!
//! A frontmatter block starts on the very first line with the exact token `---` and
//! ends at the next line that is exactly `---`. Both delimiters belong to the block.
//! Everything after the closing delimiter is body. There is no whitespace tolerance
//! around the delimiter and no YAML parsing here; this module only finds the extent of
//! the block.
//!
//! Lines are read through a [`LineCursor`], which never hands a consumed line back to
//! its source. Callers that only want the leading block use [`take_frontmatter`] and
//! keep streaming the body from the same cursor.
//!
//! # Example
//!
//! ```rust
//! use frontplate::markdown::frontmatter::{LineCursor, split};
//!
//! let cursor = LineCursor::from_lines(["---", "a: 1", "---", "body"], "inline");
//! let parts = split(cursor)?;
//! assert_eq!(parts.frontmatter, ["---", "a: 1", "---"]);
//! assert_eq!(parts.body, ["body"]);
//! assert!(parts.had_frontmatter);
//! # Ok::<(), frontplate::core::FrontplateError>(())
//! ```

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::core::{FileOperation, FrontplateError, IoResultExt, Result};

/// The frontmatter delimiter line.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Returns true if `line` is exactly the frontmatter delimiter.
#[must_use]
pub fn is_delimiter(line: &str) -> bool {
    line == FRONTMATTER_DELIMITER
}

/// Forward-only cursor over the lines of a file or buffer.
///
/// Tracks how many lines have been consumed so callers can translate positions back to
/// line numbers in the source.
pub struct LineCursor<'a> {
    lines: Box<dyn Iterator<Item = std::io::Result<String>> + 'a>,
    origin: PathBuf,
    consumed: usize,
}

impl<'a> LineCursor<'a> {
    /// Wrap a fallible line iterator. `origin` is used in error messages.
    pub fn new<I>(lines: I, origin: impl Into<PathBuf>) -> Self
    where
        I: Iterator<Item = std::io::Result<String>> + 'a,
    {
        Self {
            lines: Box::new(lines),
            origin: origin.into(),
            consumed: 0,
        }
    }

    /// Read lines from a buffered reader. Both `\n` and `\r\n` terminators are stripped.
    pub fn from_reader<R>(reader: R, origin: impl Into<PathBuf>) -> Self
    where
        R: BufRead + 'a,
    {
        Self::new(reader.lines(), origin)
    }

    /// Cursor over lines already in memory.
    pub fn from_lines<I, S>(lines: I, origin: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        Self::new(lines.into_iter().map(Ok), origin)
    }

    /// Consume the next line, or `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                let line = line.with_path(FileOperation::Read, &self.origin)?;
                self.consumed += 1;
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Where the lines come from.
    #[must_use]
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

impl Iterator for LineCursor<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// What [`take_frontmatter`] found at the start of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leading {
    /// A complete block, delimiters included.
    Frontmatter(Vec<String>),
    /// No frontmatter. Holds the first line already consumed, if the stream was not empty.
    Body(Option<String>),
}

/// Read the leading frontmatter block, if any, leaving the cursor on the first body line.
///
/// # Errors
///
/// [`FrontplateError::InvalidFrontmatter`] if the stream ends before the closing
/// delimiter, and [`FrontplateError::ReadError`] if the underlying source fails.
pub fn take_frontmatter(cursor: &mut LineCursor<'_>) -> Result<Leading> {
    let Some(first) = cursor.next_line()? else {
        return Ok(Leading::Body(None));
    };

    if !is_delimiter(&first) {
        return Ok(Leading::Body(Some(first)));
    }

    let mut block = vec![first];
    while let Some(line) = cursor.next_line()? {
        let closes = is_delimiter(&line);
        block.push(line);
        if closes {
            tracing::debug!(
                "Frontmatter in {} spans {} lines",
                cursor.origin().display(),
                block.len()
            );
            return Ok(Leading::Frontmatter(block));
        }
    }

    Err(FrontplateError::InvalidFrontmatter {
        origin: cursor.origin().to_path_buf(),
    })
}

/// A line stream partitioned into frontmatter and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontmatterSplit {
    /// The block with both delimiters, empty when absent.
    pub frontmatter: Vec<String>,
    /// Every line after the block.
    pub body: Vec<String>,
    /// Whether the stream started with a frontmatter block.
    pub had_frontmatter: bool,
}

impl FrontmatterSplit {
    /// The lines between the delimiters.
    #[must_use]
    pub fn interior(&self) -> &[String] {
        if self.frontmatter.len() < 2 {
            return &[];
        }
        &self.frontmatter[1..self.frontmatter.len() - 1]
    }

    /// 0-based index of the closing delimiter in the original stream.
    #[must_use]
    pub fn closing_line(&self) -> Option<usize> {
        self.had_frontmatter.then(|| self.frontmatter.len() - 1)
    }
}

/// Partition a whole stream into frontmatter and body.
///
/// # Errors
///
/// Same as [`take_frontmatter`].
pub fn split(mut cursor: LineCursor<'_>) -> Result<FrontmatterSplit> {
    let mut parts = FrontmatterSplit::default();

    match take_frontmatter(&mut cursor)? {
        Leading::Frontmatter(block) => {
            parts.frontmatter = block;
            parts.had_frontmatter = true;
        }
        Leading::Body(first) => parts.body.extend(first),
    }

    for line in cursor {
        parts.body.push(line?);
    }

    Ok(parts)
}
