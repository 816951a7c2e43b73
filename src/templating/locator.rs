//! Template lookup.
//!
//! A template reference is either a name relative to the templates directory or a path
//! of its own. Candidates are tried in this order, first regular file wins:
//!
//! 1. `templates_dir/<ref>`
//! 2. `templates_dir/<ref>.md` (only when `<ref>` does not already end in `.md`)
//! 3. `<ref>`
//! 4. `<ref>.md` (same condition)

use std::path::{Path, PathBuf};
use strsim::levenshtein;

use crate::core::{FrontplateError, Result};
use crate::markdown::list_markdown_files;

/// Source of the configured templates directory.
pub trait TemplatesDirProvider {
    /// The templates directory, or `None` when it is not configured.
    fn templates_dir(&self) -> Option<PathBuf>;
}

impl TemplatesDirProvider for Option<PathBuf> {
    fn templates_dir(&self) -> Option<PathBuf> {
        self.clone()
    }
}

impl TemplatesDirProvider for PathBuf {
    fn templates_dir(&self) -> Option<PathBuf> {
        Some(self.clone())
    }
}

/// Maximum edit distance, as a percentage of the reference length, for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

const TEMPLATE_SUFFIX: &str = ".md";

/// Resolve `template_ref` to a template file.
///
/// # Errors
///
/// - [`FrontplateError::TemplatesDirUndefined`] when `templates_dir` is `None`, before
///   any file-system access
/// - [`FrontplateError::TemplateNotFound`] when no candidate is a regular file
///
/// ```rust,no_run
/// use frontplate::templating::resolve_template;
/// use std::path::Path;
///
/// let path = resolve_template("daily", Some(Path::new("vault/templates")))?;
/// # Ok::<(), frontplate::core::FrontplateError>(())
/// ```
pub fn resolve_template(template_ref: &str, templates_dir: Option<&Path>) -> Result<PathBuf> {
    let templates_dir = templates_dir.ok_or(FrontplateError::TemplatesDirUndefined)?;

    for base in [templates_dir.join(template_ref), PathBuf::from(template_ref)] {
        for candidate in with_suffix_fallback(base) {
            if candidate.is_file() {
                tracing::debug!("Resolved template '{}' to {}", template_ref, candidate.display());
                return Ok(candidate);
            }
        }
    }

    Err(FrontplateError::TemplateNotFound {
        name: template_ref.to_string(),
        templates_dir: templates_dir.to_path_buf(),
        suggestions: similar_templates(template_ref, templates_dir),
    })
}

fn with_suffix_fallback(path: PathBuf) -> Vec<PathBuf> {
    if path.to_string_lossy().ends_with(TEMPLATE_SUFFIX) {
        return vec![path];
    }
    let mut suffixed = path.clone().into_os_string();
    suffixed.push(TEMPLATE_SUFFIX);
    vec![path, PathBuf::from(suffixed)]
}

/// Markdown templates under `templates_dir`, relative to it and sorted.
#[must_use]
pub fn list_templates(templates_dir: &Path) -> Vec<PathBuf> {
    let mut templates: Vec<PathBuf> = list_markdown_files(templates_dir)
        .into_iter()
        .filter_map(|path| path.strip_prefix(templates_dir).ok().map(Path::to_path_buf))
        .collect();
    templates.sort();
    templates
}

/// Up to three template names close to `template_ref`.
fn similar_templates(template_ref: &str, templates_dir: &Path) -> Vec<String> {
    let wanted = template_ref.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(template_ref);
    let limit = wanted.len() * SIMILARITY_THRESHOLD_PERCENT / 100;

    let mut scored: Vec<(String, usize)> = list_templates(templates_dir)
        .into_iter()
        .map(|path| {
            let name = path.to_string_lossy().replace('\\', "/");
            let stem = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(&name).to_string();
            let distance = levenshtein(wanted, &stem);
            (name, distance)
        })
        .filter(|(_, distance)| *distance <= limit)
        .collect();

    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    scored.into_iter().take(3).map(|(name, _)| name).collect()
}
