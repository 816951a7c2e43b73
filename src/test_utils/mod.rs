//! Test utilities for frontplate
//!
//! Available to unit tests and, through the `test-utils` feature, to integration tests.
//!
//! - [`init_test_logging`] - one-time tracing setup that plays well with the test harness
//! - [`TestVault`] - a temporary vault with a templates directory and a config file
//! - [`ScriptedPrompt`] - a [`Prompt`] answering from a fixed table
//!
//! # Example
//!
//! ```rust,no_run
//! use frontplate::buffer::MemoryBuffer;
//! use frontplate::markdown::Note;
//! use frontplate::test_utils::{ScriptedPrompt, TestVault};
//!
//! let vault = TestVault::new().unwrap();
//! vault.add_template("greet.md", "Hello {{name}}\n").unwrap();
//!
//! let mut note = Note::new("n");
//! let mut buffer = MemoryBuffer::default();
//! let mut prompt = ScriptedPrompt::new([("name", "World")]);
//! vault.engine().insert_template("greet", &mut note, &mut buffer, 0, &mut prompt).unwrap();
//! assert_eq!(buffer.lines(), ["Hello World"]);
//! ```

pub mod environment;

pub use environment::TestVault;

use std::collections::BTreeMap;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::prompt::Prompt;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=frontplate=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A [`Prompt`] that answers from a table keyed by placeholder name.
///
/// Names missing from the table get no answer, which leaves the placeholder in place.
/// Every question is recorded so tests can check what was asked.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: BTreeMap<String, String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    /// Create a prompt answering `name -> value`.
    pub fn new<I, K, V>(answers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            asked: Vec::new(),
        }
    }

    /// Placeholder names asked for, in order.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        let name = message.split('\'').nth(1).unwrap_or(message).to_string();
        let answer = self.answers.get(&name).cloned();
        self.asked.push(name);
        answer
    }
}
