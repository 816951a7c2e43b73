//! Folding a template's frontmatter into an existing note.
//!
//! Merge rules:
//! - metadata keys: the template wins on conflict
//! - tags and aliases: union, never removed
//! - `id` and title: untouched
//!
//! The template block is expanded and parsed before the target is touched, so a
//! template whose frontmatter cannot be parsed leaves the target exactly as it was.

use std::path::Path;

use super::{Note, NoteParser};
use crate::core::Result;
use crate::prompt::Prompt;
use crate::templating::{SubstitutionContext, expand};

/// Merge `template_frontmatter` (a complete block, delimiters included) into `target`.
///
/// Returns the target's regenerated frontmatter block, delimiters included, ready to
/// replace the old block.
pub fn merge_frontmatter(
    template_frontmatter: &[String],
    template_path: &Path,
    target: &mut Note,
    parser: &dyn NoteParser,
    ctx: &mut SubstitutionContext,
    prompt: &mut dyn Prompt,
) -> Result<Vec<String>> {
    let expanded: Vec<String> =
        template_frontmatter.iter().map(|line| expand(line, ctx, prompt)).collect();
    let template = parser.from_lines(expanded, Some(template_path))?;

    apply(&template, target);

    target.frontmatter_lines(true)
}

/// Copy metadata, tags and aliases from `template` into `target`.
fn apply(template: &Note, target: &mut Note) {
    for (key, value) in &template.metadata {
        if let Some(previous) = target.metadata.insert(key.clone(), value.clone())
            && previous != *value
        {
            tracing::debug!("Template overrides metadata key {:?}", key);
        }
    }

    for tag in &template.tags {
        target.add_tag(tag.clone());
    }

    for alias in &template.aliases {
        target.add_alias(alias.clone());
    }
}
