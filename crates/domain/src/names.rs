//! Helpers for comparing DNS names as plain strings.
//!
//! Names coming from NetBox and from the wire differ only in the trailing
//! root dot, so every comparison happens on the dot-trimmed form.

/// Strips a single trailing root dot.
pub fn normalize(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Returns `name` with exactly one trailing dot.
pub fn to_fqdn(name: &str) -> String {
    format!("{}.", normalize(name))
}

/// True when `name` equals `parent` or lies below it. Comparison is
/// case-sensitive; the root zone (`.` or empty) contains every name.
pub fn is_subdomain(name: &str, parent: &str) -> bool {
    let name = normalize(name);
    let parent = normalize(parent);

    if parent.is_empty() || name == parent {
        return true;
    }

    name.len() > parent.len()
        && name.ends_with(parent)
        && name.as_bytes()[name.len() - parent.len() - 1] == b'.'
}
