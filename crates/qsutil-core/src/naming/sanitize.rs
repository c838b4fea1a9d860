//! Title cleaning for wallpaper filenames.

/// Linux NAME_MAX.
pub const NAME_MAX: usize = 255;

/// Reduces a provider title to a filename-safe fragment.
///
/// - Keeps alphanumerics (any script), space, `-` and `_`; drops the rest
/// - Strips trailing whitespace
/// - Replaces spaces with `_`
pub fn clean_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim_end().replace(' ', "_")
}

/// Truncates `name` to at most `max` bytes on a char boundary.
pub fn truncate_bytes(name: &str, max: usize) -> &str {
    if name.len() <= max {
        return name;
    }
    let mut take = max;
    while take > 0 && !name.is_char_boundary(take) {
        take -= 1;
    }
    &name[..take]
}
