/// Checks a filename's extension against an allow-list.
///
/// The extension is whatever follows the last dot, compared
/// case-insensitively. A name with no dot has no extension and is never
/// allowed.
pub fn allowed_file(filename: &str, allowed: &[&str]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|candidate| *candidate == ext)
        }
        None => false,
    }
}

/// Reduces a client-supplied filename to something safe to join onto an
/// upload directory.
///
/// Strips any path components (both separator styles), maps whitespace to
/// underscores, drops everything outside `[A-Za-z0-9._-]`, and trims
/// leading/trailing dots and underscores. Returns `None` when nothing
/// usable remains.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
