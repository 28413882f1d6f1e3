//! Virtual path handling.
//!
//! Paths are plain `/`-separated strings supplied by the agent. Nothing
//! here touches a real file system.

/// Path separator used by virtual paths.
pub const SEPARATOR: char = '/';

/// Normalize a path as supplied by the agent (surrounding whitespace removed).
pub fn normalize(path: &str) -> &str {
    path.trim()
}

/// Split a path into its segments, discarding empty ones produced by
/// leading, trailing or doubled separators.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|segment| !segment.is_empty())
}

/// Every proper-prefix directory of `path`, shallowest first.
///
/// `"a/b/c.tf"` yields `["a", "a/b"]`.
pub fn ancestors(path: &str) -> Vec<String> {
    let parts: Vec<&str> = segments(path).collect();
    let mut result = Vec::with_capacity(parts.len().saturating_sub(1));
    let mut current = String::new();

    for part in parts.iter().take(parts.len().saturating_sub(1)) {
        if !current.is_empty() {
            current.push(SEPARATOR);
        }
        current.push_str(part);
        result.push(current.clone());
    }

    result
}

/// Join a parent path and a child segment.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", parent, SEPARATOR, name)
    }
}

/// Whether a single segment can name a tree node.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.trim().is_empty() && segment != "." && segment != ".."
}

/// Whether a file name carries a non-empty extension after its last dot.
pub fn has_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => !ext.is_empty(),
        None => false,
    }
}

/// The extension of a file name, if any.
pub fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Whether a file at `path` may appear in the projected tree.
///
/// Malformed agent paths (empty, separators only, a leaf without an
/// extension, `.`/`..` segments) stay in the store but are never rendered.
pub fn is_projectable(path: &str) -> bool {
    let path = normalize(path);
    if path.is_empty() {
        return false;
    }

    let parts: Vec<&str> = segments(path).collect();
    let Some(leaf) = parts.last() else {
        return false;
    };

    has_extension(leaf) && parts.iter().all(|part| is_valid_segment(part))
}
