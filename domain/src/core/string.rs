//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, appending `...`
/// when anything was cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept.trim_end())
    }
}

/// Collapse runs of whitespace into single spaces.
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
