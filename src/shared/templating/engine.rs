use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::value::{ContextMap, ContextValue};

lazy_static! {
    /// A placeholder: `{{name}}` or `{{name.sub.path}}`, with optional inner spaces.
    /// - Valid: "{{user_message}}", "{{ user.name }}", "{{kb-text}}"
    /// - Not placeholders: "{user}", "{{}}", "{{ a b }}", "{{.name}}", "{{1abc}}"
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_-]*(?:\.[A-Za-z0-9_-]+)*)\s*\}\}").unwrap();
}

/// Resolve a dotted path against the context.
///
/// Returns `None` for a missing key, a path through a non-map, or a `Null` leaf.
pub fn resolve<'a>(ctx: &'a ContextMap, path: &str) -> Option<&'a ContextValue> {
    let mut segments = path.split('.');
    let root = ctx.get(segments.next()?)?;
    root.lookup(segments)
}

/// Substitute every placeholder in `template` with its value from `ctx`.
///
/// Unresolved placeholders are kept exactly as written. Substituted values are
/// inserted verbatim and never rescanned, so a value containing `{{x}}` stays literal.
pub fn render(template: &str, ctx: &ContextMap) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| match resolve(ctx, &caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Distinct placeholder paths in order of first appearance
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let path = &caps[1];
        if !seen.iter().any(|p| p == path) {
            seen.push(path.to_string());
        }
    }
    seen
}

/// Placeholder paths in `template` that `ctx` cannot resolve
pub fn unresolved(template: &str, ctx: &ContextMap) -> Vec<String> {
    placeholders(template)
        .into_iter()
        .filter(|path| resolve(ctx, path).is_none())
        .collect()
}
