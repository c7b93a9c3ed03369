//! Homebrew formula rendering.
//!
//! Formula templates are plain Ruby files with `{{ name }}` placeholders.
//! Whitespace inside the braces is optional. Known names are `version` and
//! `<asset file name>_url`; commit message formats also know `formula`.
//! Placeholders without a value are left exactly as written.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use tagship_release::UploadedAsset;
use tagship_release::error::{Error, Result};

/// `{{`, optional whitespace, an identifier without braces or whitespace,
/// optional whitespace, `}}`.
const PLACEHOLDER: &str = r"\{\{\s*([^{}\s]+)\s*\}\}";

/// Substitutes every placeholder that has a value in `values`.
///
/// # Errors
///
/// Returns an error only if the placeholder pattern fails to compile.
pub fn render(template: &str, values: &HashMap<String, String>) -> Result<String> {
    let re = Regex::new(PLACEHOLDER).map_err(|e| {
        Error::backend("Homebrew", format!("Invalid placeholder pattern: {e}"), None)
    })?;

    let rendered = re.replace_all(template, |caps: &Captures| {
        values
            .get(&caps[1])
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    });

    Ok(rendered.into_owned())
}

/// Renders a formula template for a release.
///
/// `{{ version }}` becomes `version` and `{{ <name>_url }}` becomes the
/// download URL of the uploaded asset called `<name>`.
///
/// # Errors
///
/// See [`render`].
pub fn render_formula(template: &str, version: &str, assets: &[UploadedAsset]) -> Result<String> {
    let mut values: HashMap<String, String> = assets
        .iter()
        .map(|asset| {
            (
                format!("{}_url", asset.name),
                asset.browser_download_url.clone(),
            )
        })
        .collect();
    values.insert("version".to_string(), version.to_string());

    render(template, &values)
}

/// Renders the commit message for a formula update.
///
/// # Errors
///
/// See [`render`].
pub fn render_commit_message(format: &str, formula: &str, version: &str) -> Result<String> {
    let values = HashMap::from([
        ("formula".to_string(), formula.to_string()),
        ("version".to_string(), version.to_string()),
    ]);
    render(format, &values)
}

/// Formula name derived from the template file name, without extension.
#[must_use]
pub fn formula_name(template: &Path) -> Option<String> {
    template
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Path of the formula inside the tap repository.
///
/// Trailing slashes of `dir` are dropped and an empty `dir` means the tap
/// root, so the contents API never sees an empty path segment.
#[must_use]
pub fn formula_path(dir: &str, formula: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("{formula}.rb")
    } else {
        format!("{dir}/{formula}.rb")
    }
}
