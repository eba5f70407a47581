//! Tree name validation helpers.

/// True when `name` can be used as a tree file stem.
///
/// Rejects empty names, leading dots, path separators, and NUL, so a name
/// can never address anything outside its source directory.
pub fn is_valid_tree_name(name: &str) -> bool {
    if name.is_empty() || name.starts_with('.') {
        return false;
    }
    !(name.contains('/') || name.contains('\\') || name.contains('\0'))
}
