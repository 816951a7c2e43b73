//! Substitution values for one template expansion.
//!
//! A [`SubstitutionContext`] maps placeholder names to [`Substitution`]s. Computed
//! values run at most once: the first lookup stores the result back as a literal, and
//! every later line of the same document reuses it. Build a fresh context for every
//! document; nothing is shared between expansions.
//!
//! # Precedence
//!
//! User substitutions from the configuration win. The built-ins `date`, `time`,
//! `title`, `id` and `path` are only added for names the user did not define, and `id`
//! and `path` are only added when the note has them.

use chrono::Local;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fmt::Write as _;

use crate::markdown::Note;

/// Default strftime format for `{{date}}`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default strftime format for `{{time}}`.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Settings that shape a substitution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSettings {
    /// strftime format for `{{date}}`
    pub date_format: String,
    /// strftime format for `{{time}}`
    pub time_format: String,
    /// User-defined literal substitutions
    pub substitutions: BTreeMap<String, String>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            substitutions: BTreeMap::new(),
        }
    }
}

/// Value bound to a placeholder name.
pub enum Substitution {
    /// Used as is.
    Literal(String),
    /// Produced on first use, then replaced by its result.
    Computed(Box<dyn FnOnce() -> String>),
}

impl Substitution {
    /// Wrap a producer.
    pub fn computed(produce: impl FnOnce() -> String + 'static) -> Self {
        Self::Computed(Box::new(produce))
    }
}

impl fmt::Debug for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<String> for Substitution {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for Substitution {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

/// Placeholder values for a single document expansion.
#[derive(Debug, Default)]
pub struct SubstitutionContext {
    values: BTreeMap<String, Substitution>,
    answers: BTreeMap<String, String>,
    skipped: BTreeSet<String>,
}

impl SubstitutionContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for expanding a template against `note`.
    #[must_use]
    pub fn for_note(note: &Note, settings: &TemplateSettings) -> Self {
        let mut ctx = Self::new();

        for (name, value) in &settings.substitutions {
            ctx.insert(name.clone(), value.as_str());
        }

        let date_format = settings.date_format.clone();
        ctx.insert_default("date", || {
            Substitution::computed(move || format_now(&date_format, DEFAULT_DATE_FORMAT))
        });
        let time_format = settings.time_format.clone();
        ctx.insert_default("time", || {
            Substitution::computed(move || format_now(&time_format, DEFAULT_TIME_FORMAT))
        });
        ctx.insert_default("title", || note.display_name().into());
        if let Some(id) = &note.id {
            ctx.insert_default("id", || id.as_str().into());
        }
        if let Some(path) = &note.path {
            ctx.insert_default("path", || path.display().to_string().into());
        }

        ctx
    }

    /// Bind `name`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Substitution>) {
        self.values.insert(name.into(), value.into());
    }

    /// Bind `name` to a producer, replacing any previous binding.
    pub fn insert_computed(
        &mut self,
        name: impl Into<String>,
        produce: impl FnOnce() -> String + 'static,
    ) {
        self.values.insert(name.into(), Substitution::computed(produce));
    }

    fn insert_default(&mut self, name: &str, value: impl FnOnce() -> Substitution) {
        if !self.values.contains_key(name) {
            self.values.insert(name.to_string(), value());
        }
    }

    /// Whether `name` has a binding.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Value of `name`, running and memoizing its producer on first use.
    pub fn resolve(&mut self, name: &str) -> Option<&str> {
        let slot = self.values.get_mut(name)?;

        if matches!(slot, Substitution::Computed(_)) {
            let taken = std::mem::replace(slot, Substitution::Literal(String::new()));
            if let Substitution::Computed(produce) = taken {
                *slot = Substitution::Literal(produce());
                tracing::debug!("Computed substitution for '{}'", name);
            }
        }

        match slot {
            Substitution::Literal(value) => Some(value.as_str()),
            Substitution::Computed(_) => None,
        }
    }

    /// Remember a prompted answer so the name is not asked again.
    ///
    /// Answers live apart from the bound values: they are only consulted for tokens
    /// that did not match a binding exactly, and never shadow one.
    pub fn remember_answer(&mut self, name: &str, value: String) {
        self.answers.insert(name.to_string(), value);
    }

    /// Answer previously given for `name`.
    #[must_use]
    pub fn answer(&self, name: &str) -> Option<&str> {
        self.answers.get(name).map(String::as_str)
    }

    /// Remember that the user declined to give a value for `name`.
    pub fn mark_skipped(&mut self, name: &str) {
        self.skipped.insert(name.to_string());
    }

    /// Whether the user already declined `name` in this expansion.
    #[must_use]
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skipped.contains(name)
    }
}

/// Format the current local time, falling back when `format` is not valid strftime.
fn format_now(format: &str, fallback: &str) -> String {
    let now = Local::now();
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        tracing::warn!("Invalid date/time format '{}', using '{}'", format, fallback);
        out.clear();
        // The fallbacks are fixed, known-good formats
        let _ = write!(out, "{}", now.format(fallback));
    }
    out
}
