//! Error handling for frontplate
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`FrontplateError`]) so callers can tell a missing
//!    template from a broken frontmatter block without parsing messages
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and a suggestion for
//!    the command-line front end
//!
//! # Error Categories
//!
//! - **Configuration**: [`FrontplateError::TemplatesDirUndefined`],
//!   [`FrontplateError::ConfigError`]
//! - **Lookup**: [`FrontplateError::TemplateNotFound`]
//! - **I/O**: [`FrontplateError::ReadError`], [`FrontplateError::WriteError`],
//!   [`FrontplateError::CreateDirError`]
//! - **Document structure**: [`FrontplateError::InvalidFrontmatter`],
//!   [`FrontplateError::MetadataParse`]
//!
//! Every variant names the offending path or template so the message alone is enough
//! to act on.
//!
//! # Examples
//!
//! ```rust,no_run
//! use frontplate::core::{FrontplateError, user_friendly_error};
//!
//! let err = FrontplateError::TemplatesDirUndefined;
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used by the engine.
pub type Result<T, E = FrontplateError> = std::result::Result<T, E>;

/// The main error type for frontplate operations.
///
/// Each variant is fatal for the operation that produced it. Nothing in the engine
/// retries, and nothing swallows an error; the caller decides what to do.
#[derive(Error, Debug)]
pub enum FrontplateError {
    /// No templates directory is configured
    #[error("No templates directory is configured")]
    TemplatesDirUndefined,

    /// The template reference did not match any file
    #[error("Template '{name}' not found in {}", templates_dir.display())]
    TemplateNotFound {
        /// The reference as given by the caller
        name: String,
        /// The templates directory that was searched
        templates_dir: PathBuf,
        /// Close matches among the available templates
        suggestions: Vec<String>,
    },

    /// Reading a template or document failed
    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        /// The file being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing a destination document failed
    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        /// The file being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Creating the parent directory of a destination failed
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDirError {
        /// The directory being created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A frontmatter block was opened but never closed
    #[error("Invalid frontmatter in {}: opening '---' has no closing '---'", origin.display())]
    InvalidFrontmatter {
        /// Where the lines came from
        origin: PathBuf,
    },

    /// Frontmatter was well delimited but its contents could not be read as metadata,
    /// or a note's metadata could not be rendered back to YAML
    #[error("Unable to process frontmatter metadata in {}: {reason}", origin.display())]
    MetadataParse {
        /// Where the lines came from
        origin: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Configuration file problem
    #[error("Configuration error in {}: {message}", path.display())]
    ConfigError {
        /// Configuration file path
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

/// Which side of an I/O operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    /// Reading a file
    Read,
    /// Writing a file
    Write,
    /// Creating a directory
    CreateDir,
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOperation::Read => write!(f, "reading"),
            FileOperation::Write => write!(f, "writing"),
            FileOperation::CreateDir => write!(f, "creating directory"),
        }
    }
}

/// Extension trait that attaches the path and operation to `std::io` results.
///
/// ```rust,no_run
/// use frontplate::core::{FileOperation, IoResultExt};
/// use std::path::Path;
///
/// let path = Path::new("notes/trip.md");
/// let text = std::fs::read_to_string(path).with_path(FileOperation::Read, path)?;
/// # Ok::<(), frontplate::core::FrontplateError>(())
/// ```
pub trait IoResultExt<T> {
    /// Convert an I/O error into the matching [`FrontplateError`] variant.
    fn with_path(self, operation: FileOperation, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, operation: FileOperation, path: &Path) -> Result<T> {
        self.map_err(|source| {
            let path = path.to_path_buf();
            match operation {
                FileOperation::Read => FrontplateError::ReadError {
                    path,
                    source,
                },
                FileOperation::Write => FrontplateError::WriteError {
                    path,
                    source,
                },
                FileOperation::CreateDir => FrontplateError::CreateDirError {
                    path,
                    source,
                },
            }
        })
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show the main message in red, optional details in yellow
/// and an optional suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The main error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-facing [`ErrorContext`].
///
/// Known [`FrontplateError`] variants get tailored suggestions; anything else is shown
/// with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(err) = error.downcast_ref::<FrontplateError>() {
        return create_error_context(err);
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(message)
}

fn create_error_context(error: &FrontplateError) -> ErrorContext {
    let ctx = ErrorContext::new(error.to_string());
    match error {
        FrontplateError::TemplatesDirUndefined => ctx
            .with_suggestion("Set 'templates_dir' in your config.toml or pass --config")
            .with_details("Template names are looked up relative to the templates directory"),
        FrontplateError::TemplateNotFound {
            suggestions,
            ..
        } => {
            let ctx = ctx.with_details(
                "Tried the name as given and with a '.md' suffix, inside the templates \
                 directory and as a plain path",
            );
            if suggestions.is_empty() {
                ctx.with_suggestion("Run 'frontplate list' to see the available templates")
            } else {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
        FrontplateError::ReadError {
            source,
            ..
        }
        | FrontplateError::WriteError {
            source,
            ..
        }
        | FrontplateError::CreateDirError {
            source,
            ..
        } => match source.kind() {
            std::io::ErrorKind::PermissionDenied => {
                ctx.with_suggestion("Check file and directory permissions")
            }
            std::io::ErrorKind::InvalidData => {
                ctx.with_suggestion("Ensure the file contains valid UTF-8 text")
            }
            _ => ctx,
        },
        FrontplateError::InvalidFrontmatter {
            ..
        } => ctx
            .with_suggestion("Add a closing '---' line after the frontmatter block")
            .with_details("A file that starts with '---' must close the block with another '---'"),
        FrontplateError::MetadataParse {
            ..
        } => ctx.with_suggestion("Check the YAML syntax between the '---' delimiters"),
        FrontplateError::ConfigError {
            ..
        } => ctx.with_suggestion("Check the TOML syntax of the configuration file"),
    }
}
