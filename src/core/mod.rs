//! Core types shared by every frontplate module
//!
//! This module holds the error taxonomy used across the crate:
//! - [`FrontplateError`] - enumerated failure modes of the engine
//! - [`ErrorContext`] - user-friendly wrapper with details and suggestions
//! - [`user_friendly_error`] - convert any `anyhow::Error` for display
//! - [`IoResultExt`] - attach a path and operation to `std::io` failures
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use frontplate::core::{FrontplateError, Result};
//!
//! fn require_dir(dir: Option<std::path::PathBuf>) -> Result<std::path::PathBuf> {
//!     dir.ok_or(FrontplateError::TemplatesDirUndefined)
//! }
//!
//! assert!(matches!(require_dir(None), Err(FrontplateError::TemplatesDirUndefined)));
//! ```

pub mod error;

pub use error::{
    ErrorContext, FileOperation, FrontplateError, IoResultExt, Result, user_friendly_error,
};
