//! Placeholder extraction and substitution over script templates.
//!
//! A placeholder is written `$(name)` where `name` is any run of characters
//! up to the closing parenthesis, the empty string included. The script body
//! around the markers is opaque text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Marker syntax: a dollar sign, open paren, zero or more non-`)` characters,
/// close paren. The capture group is the placeholder name.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\(([^)]*)\)").expect("valid placeholder pattern"));

/// Scan `template` left to right and return every placeholder name,
/// deduplicated on first occurrence with first-seen order preserved.
///
/// Total over all inputs: a template with no markers yields an empty list,
/// and `$()` yields the empty-string name. There is no escape syntax; `$(`
/// always starts a marker.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace every `$(name)` marker whose name has a binding with the bound
/// value, verbatim. Markers with no binding are retained literally.
///
/// Substitution is a single left-to-right pass: a bound value that itself
/// contains `$(other)` is not re-expanded. Values are interpolated without
/// any quoting or escaping, so a value containing shell metacharacters will
/// be interpreted by the downstream shell; sanitizing values is the caller's
/// responsibility.
pub fn render_template(template: &str, bindings: &HashMap<String, String>) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
