pub mod listing;

pub use listing::*;

/// Collapse line breaks so a title fits on one line of the day record.
///
/// Other whitespace is kept as-is; the result is the literal de-duplication key.
pub fn normalize_title(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_joins_lines() {
        assert_eq!(normalize_title("heap\noverflow"), "heap overflow");
        assert_eq!(normalize_title("heap\r\noverflow\r"), "heap overflow ");
    }

    #[test]
    fn test_normalize_title_keeps_other_whitespace() {
        assert_eq!(normalize_title("  a\tb "), "  a\tb ");
        assert_eq!(normalize_title(""), "");
    }
}
