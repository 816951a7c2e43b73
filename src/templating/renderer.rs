//! Placeholder expansion.
//!
//! Placeholders are `{{` + name + `}}` with no nesting and no escaping. Expansion is a
//! single left-to-right pass over the input: each token is looked up in the
//! [`SubstitutionContext`] and, failing that, the user is asked through a [`Prompt`].
//! Output is assembled from slices of the original text and the substituted values,
//! so a value that itself contains `{{...}}` is never expanded again.

use regex::Regex;
use std::sync::LazyLock;

use super::context::SubstitutionContext;
use crate::prompt::Prompt;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern is a valid regex")
});

/// Expand every placeholder in `text`.
///
/// Only an exact `{{key}}` for a bound key is replaced with its (memoized) value, so
/// `{{ title }}` is not the built-in `title`. For any other token the surrounding
/// whitespace is stripped from the name and `prompt` is asked once per name; an empty answer leaves the token as it was. Answers and skips are remembered
/// in `ctx`, so pass the same context for every line of a document.
///
/// ```rust
/// use frontplate::prompt::NoPrompt;
/// use frontplate::templating::{SubstitutionContext, expand};
///
/// let mut ctx = SubstitutionContext::new();
/// ctx.insert("title", "Trip");
/// assert_eq!(expand("# {{title}} {{later}}", &mut ctx, &mut NoPrompt), "# Trip {{later}}");
/// ```
pub fn expand(text: &str, ctx: &mut SubstitutionContext, prompt: &mut dyn Prompt) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        let name = caps.get(1).map_or("", |m| m.as_str());

        out.push_str(&text[last..token.start()]);
        match value_for(name, ctx, prompt) {
            Some(value) => out.push_str(&value),
            None => out.push_str(token.as_str()),
        }
        last = token.end();
    }

    out.push_str(&text[last..]);
    out
}

fn value_for(raw: &str, ctx: &mut SubstitutionContext, prompt: &mut dyn Prompt) -> Option<String> {
    if let Some(value) = ctx.resolve(raw) {
        return Some(value.to_string());
    }

    let name = raw.trim();
    if name.is_empty() || ctx.is_skipped(name) {
        return None;
    }
    if let Some(value) = ctx.answer(name) {
        return Some(value.to_string());
    }

    let message = format!("Enter value for '{name}' (<cr> to skip):");
    match prompt.ask(&message) {
        Some(answer) if !answer.is_empty() => {
            tracing::debug!("Using prompted value for '{}'", name);
            ctx.remember_answer(name, answer.clone());
            Some(answer)
        }
        _ => {
            tracing::debug!("Leaving '{{{{{}}}}}' unexpanded", name);
            ctx.mark_skipped(name);
            None
        }
    }
}
