//! Path rules for the remote store.
//!
//! Remote paths are relative, "/"-separated and never start with a slash.
//! The synthetic root of the tree uses [`ROOT_PATH`] instead.

use crate::error::MutationError;

/// Path of the synthetic root node representing the project namespace.
pub const ROOT_PATH: &str = "/";

pub fn is_root(path: &str) -> bool {
    path == ROOT_PATH
}

/// Split a raw record path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Strip leading/trailing slashes and collapse empty segments.
pub fn normalize(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

/// Join a directory path and a child name.
///
/// The root directory contributes nothing, so `join("/", "a.txt")` is `"a.txt"`.
pub fn join(directory: &str, name: &str) -> String {
    if is_root(directory) || directory.is_empty() {
        name.to_string()
    } else {
        format!("{directory}/{name}")
    }
}

/// Parent directory of a path, or [`ROOT_PATH`] for top-level entries.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => ROOT_PATH,
    }
}

/// Last segment of a path.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Validate a user-supplied entry name or rename target before anything goes
/// over the wire.
///
/// Returns the normalized name. Nested names like `docs/readme.md` are allowed,
/// traversal segments are not.
pub fn validate_entry_name(name: &str) -> Result<String, MutationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MutationError::EmptyName);
    }
    if segments(trimmed).any(|segment| segment.trim().is_empty() || segment == "." || segment == "..") {
        return Err(MutationError::InvalidName(trimmed.to_string()));
    }
    let normalized = normalize(trimmed);
    if normalized.is_empty() {
        return Err(MutationError::InvalidName(trimmed.to_string()));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_root() {
        assert_eq!(join(ROOT_PATH, "a.txt"), "a.txt");
        assert_eq!(join("", "a.txt"), "a.txt");
        assert_eq!(join("a/b", "c.txt"), "a/b/c.txt");
    }

    #[test]
    fn parent_and_file_name() {
        assert_eq!(parent("a/b/c.txt"), "a/b");
        assert_eq!(parent("c.txt"), ROOT_PATH);
        assert_eq!(file_name("a/b/c.txt"), "c.txt");
        assert_eq!(file_name("c.txt"), "c.txt");
    }

    #[test]
    fn normalize_strips_slashes() {
        assert_eq!(normalize("/a//b/"), "a/b");
        assert_eq!(normalize("///"), "");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(matches!(validate_entry_name(""), Err(MutationError::EmptyName)));
        assert!(matches!(validate_entry_name("   \t"), Err(MutationError::EmptyName)));
    }

    #[test]
    fn traversal_names_are_rejected() {
        assert!(matches!(validate_entry_name("../x"), Err(MutationError::InvalidName(_))));
        assert!(matches!(validate_entry_name("a/./b"), Err(MutationError::InvalidName(_))));
        assert!(matches!(validate_entry_name("/"), Err(MutationError::InvalidName(_))));
    }

    #[test]
    fn valid_names_are_trimmed_and_normalized() {
        assert_eq!(validate_entry_name("  notes.md ").unwrap(), "notes.md");
        assert_eq!(validate_entry_name("docs/readme.md").unwrap(), "docs/readme.md");
    }
}
