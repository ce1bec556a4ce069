/// Longest prefix of a title that is ever kept or scanned for a separator.
pub const MAX_PATTERN_CHARS: usize = 50;

const SEPARATORS: [char; 4] = ['-', '|', '\u{2014}', '\u{2013}'];

/// Derives the title pattern used to find a window again after its handle went stale.
///
/// Most applications put the document name first and the application name after a
/// separator, so the text before the first separator is the stable part. Titles
/// without an early separator are cut to [`MAX_PATTERN_CHARS`] characters.
pub fn derive_pattern(title: &str) -> String {
    let separator = title
        .chars()
        .take(MAX_PATTERN_CHARS)
        .position(|c| SEPARATORS.contains(&c));

    if let Some(index) = separator.filter(|&index| index > 0) {
        let prefix: String = title.chars().take(index).collect();
        return prefix.trim().to_string();
    }

    if title.chars().count() > MAX_PATTERN_CHARS {
        return title.chars().take(MAX_PATTERN_CHARS).collect();
    }

    title.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_before_dash() {
        assert_eq!(derive_pattern("Report.docx - Word"), "Report.docx");
    }

    #[test]
    fn test_other_separators() {
        assert_eq!(derive_pattern("Inbox | Mail"), "Inbox");
        assert_eq!(derive_pattern("notes.txt \u{2014} Editor"), "notes.txt");
        assert_eq!(derive_pattern("main.rs \u{2013} harpoon"), "main.rs");
    }

    #[test]
    fn test_long_title_truncated_verbatim() {
        let title = "a".repeat(60);
        assert_eq!(derive_pattern(&title), "a".repeat(50));

        let padded = format!(" {}", "b".repeat(70));
        assert_eq!(derive_pattern(&padded).chars().count(), 50);
        assert!(derive_pattern(&padded).starts_with(' '));
    }

    #[test]
    fn test_short_title_unchanged() {
        assert_eq!(derive_pattern("NoSeparatorShortTitle"), "NoSeparatorShortTitle");
    }

    #[test]
    fn test_leading_separator_is_ignored() {
        assert_eq!(derive_pattern("-scratch"), "-scratch");
    }

    #[test]
    fn test_separator_past_limit_falls_back_to_truncation() {
        let title = format!("{} - App", "x".repeat(55));
        assert_eq!(derive_pattern(&title), "x".repeat(50));
    }

    #[test]
    fn test_multibyte_titles_count_characters() {
        let title = format!("{} - Браузер", "я".repeat(10));
        assert_eq!(derive_pattern(&title), "я".repeat(10));

        let long = "ж".repeat(55);
        assert_eq!(derive_pattern(&long), "ж".repeat(50));
    }
}
