// ABOUTME: Utility functions for filename sanitization and text previews
// ABOUTME: Provides deterministic, filesystem-safe names for exported entries

const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces spaces and filesystem-reserved characters with `_`.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if c == ' ' || RESERVED.contains(&c) { '_' } else { c })
        .collect();

    if cleaned.is_empty() {
        "untitled".into()
    } else {
        cleaned
    }
}

/// Short, filename-safe tag derived from an entry id, used to separate
/// entries whose date and title collide.
pub fn id_suffix(id: &str) -> String {
    let tail = id
        .rsplit(|c: char| matches!(c, '-' | ':' | '/' | ',' | '.'))
        .find(|part| !part.is_empty())
        .unwrap_or(id);
    sanitize_title(tail)
}

pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_string();
    }

    // Find a valid UTF-8 boundary at or before max_chars
    let mut boundary = max_chars;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    if boundary == 0 {
        return String::new();
    }

    format!("{}...", &s[..boundary])
}
