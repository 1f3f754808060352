// Formatting utilities

/// Truncate to `max_chars` characters, appending an ellipsis marker when
/// anything was cut. Operates on chars, not bytes, so accented text is safe.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_untouched() {
        assert_eq!(truncate("hello", 100), "hello");
        assert_eq!(truncate("", 100), "");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        let long = "x".repeat(150);
        let result = truncate(&long, 100);
        assert_eq!(result.len(), 103);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        let accented = "é".repeat(120);
        let result = truncate(&accented, 100);
        assert_eq!(result.chars().count(), 103);
        assert!(result.ends_with("..."));
    }
}
