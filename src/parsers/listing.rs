use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::error::{MonitorError, Result};
use crate::models::Entry;
use crate::parsers::normalize_title;

/// Message links sit in a top-level list directly under `<body>`.
pub const LISTING_SELECTOR: &str = "html > body > ul > li > a";

static LISTING: Lazy<Selector> =
    Lazy::new(|| Selector::parse(LISTING_SELECTOR).expect("Invalid listing selector"));

/// Extract message entries in document order.
///
/// An empty result is not an error here; the caller decides whether an
/// empty listing means the page layout changed.
pub fn extract_entries(html: &str) -> Result<Vec<Entry>> {
    Ok(select_entries(html, &LISTING))
}

/// Extract entries from a custom anchor selector, e.g. for a mirror with a
/// different layout.
pub fn extract_with_selector(html: &str, selector: &str) -> Result<Vec<Entry>> {
    let selector = Selector::parse(selector)
        .map_err(|e| MonitorError::Parse(format!("invalid selector {selector:?}: {e:?}")))?;
    Ok(select_entries(html, &selector))
}

fn select_entries(html: &str, selector: &Selector) -> Vec<Entry> {
    let document = Html::parse_document(html);

    document
        .select(selector)
        .map(|anchor| {
            let link = anchor.value().attr("href").unwrap_or_default();
            let title = normalize_title(&anchor.text().collect::<String>());
            Entry::new(link, title)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DAY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>oss-security mailing list - 2024/05/01</title></head>
<body>
<h2>Messages for 2024/05/01</h2>
<ul>
<li><a href="1">CVE-1: heap
overflow in libfoo</a> (Alice)</li>
<li><a href="2">Re: CVE-1: heap overflow in libfoo</a> (Bob)</li>
<li><a href="3">Minor doc fix &amp; typo</a> (Carol)</li>
</ul>
<p><a href="../">Back to month</a></p>
</body>
</html>"#;

    #[test]
    fn test_extracts_entries_in_order() {
        let entries = extract_entries(DAY_PAGE).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::new("1", "CVE-1: heap overflow in libfoo"),
                Entry::new("2", "Re: CVE-1: heap overflow in libfoo"),
                Entry::new("3", "Minor doc fix & typo"),
            ]
        );
    }

    #[test]
    fn test_nested_lists_are_ignored() {
        let html = r#"<html><body><div><ul><li><a href="1">nested</a></li></ul></div></body></html>"#;
        assert!(extract_entries(html).unwrap().is_empty());
    }

    #[test]
    fn test_page_without_list_yields_nothing() {
        let html = "<html><body><p>No messages yet</p></body></html>";
        assert!(extract_entries(html).unwrap().is_empty());
    }

    #[test]
    fn test_anchor_without_href_keeps_empty_link() {
        let html = "<html><body><ul><li><a>untitled link</a></li></ul></body></html>";
        let entries = extract_entries(html).unwrap();
        assert_eq!(entries, vec![Entry::new("", "untitled link")]);
    }

    #[test]
    fn test_invalid_selector_is_parse_error() {
        let err = extract_with_selector(DAY_PAGE, "li > a[").unwrap_err();
        assert!(matches!(err, MonitorError::Parse(_)));
    }
}
