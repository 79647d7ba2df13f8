//! Naming and string helpers

use std::path::Path;

/// Uppercase the first character of `s`, leaving the rest untouched
pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Derive a component name from the file it will live in.
///
/// The base name without its extension is split on `-` and each segment is
/// capitalized, so `src/user-card.jsx` becomes `UserCard`. Other characters
/// are kept as they are.
///
/// # Examples
/// ```
/// use jsx_extract::utils::component_name_from_path;
/// use std::path::Path;
///
/// assert_eq!(component_name_from_path(Path::new("/src/user-card.js")), "UserCard");
/// assert_eq!(component_name_from_path(Path::new("source.js")), "Source");
/// ```
pub fn component_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    stem.split('-').map(capitalize_first_letter).collect()
}

/// Safely truncate a string at a UTF-8 char boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of source text for log messages
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.trim().replace('\n', "\\n");
    if flat.len() <= max_bytes {
        flat
    } else {
        format!("{}...", truncate_to_char_boundary(&flat, max_bytes))
    }
}
