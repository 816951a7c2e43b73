//! Interactive value prompts for unknown placeholders.
//!
//! When a template contains `{{something}}` that no substitution covers, the engine
//! asks a [`Prompt`] for a value. An empty or missing answer means "skip": the token
//! stays in the output untouched.

use colored::Colorize;
use std::io::{BufRead, IsTerminal, Write};

/// Blocking source of user-supplied values.
pub trait Prompt {
    /// Ask for a value. `None` or an empty string skips the placeholder.
    fn ask(&mut self, message: &str) -> Option<String>;
}

/// Reads answers line by line from stdin, printing the question to stderr.
///
/// When stdin is not a terminal nothing is asked and every placeholder is skipped, so
/// scripted runs never block.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl StdinPrompt {
    /// Create a prompt that only asks when stdin is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for StdinPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            tracing::debug!("stdin is not a terminal, skipping prompt: {}", message);
            return None;
        }

        eprint!("{} ", message.green());
        std::io::stderr().flush().ok()?;

        let mut answer = String::new();
        match stdin.lock().read_line(&mut answer) {
            Ok(0) => None,
            Ok(_) => Some(answer.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read prompt answer: {}", e);
                None
            }
        }
    }
}

/// A prompt that never answers. Every unknown placeholder is left in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn ask(&mut self, _message: &str) -> Option<String> {
        None
    }
}

impl<F> Prompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn ask(&mut self, message: &str) -> Option<String> {
        self(message)
    }
}
