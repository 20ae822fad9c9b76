//! Product title extraction from the merchant's HTML product page.
//!
//! The page is not parsed as a DOM. The contract is narrow: the document
//! must contain exactly one `<title>` element, and its trimmed, entity-decoded
//! text is the search label for the product.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static TITLE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title(?:\s[^>]*)?>").expect("valid title open regex"));

static TITLE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</title\s*>").expect("valid title close regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("expected exactly one <title> tag, found {0}")]
    OpeningTag(usize),

    #[error("expected exactly one </title> tag, found {0}")]
    ClosingTag(usize),

    #[error("</title> appears before <title>")]
    OutOfOrder,

    #[error("title is empty")]
    Empty,
}

/// Returns the text of the page's single `<title>` element.
///
/// # Errors
///
/// Returns [`TitleError`] when the opening or closing tag does not occur
/// exactly once, when they are out of order, or when the title is blank.
pub fn extract_title(html: &str) -> Result<String, TitleError> {
    let opens: Vec<_> = TITLE_OPEN.find_iter(html).collect();
    let [open] = opens.as_slice() else {
        return Err(TitleError::OpeningTag(opens.len()));
    };

    let closes: Vec<_> = TITLE_CLOSE.find_iter(html).collect();
    let [close] = closes.as_slice() else {
        return Err(TitleError::ClosingTag(closes.len()));
    };

    if close.start() < open.end() {
        return Err(TitleError::OutOfOrder);
    }

    let title = decode_entities(html[open.end()..close.start()].trim());
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    Ok(title)
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trimmed_title() {
        let html = "<html><head><title>\n  Στραγγιστό Γιαούρτι 2% | Lidl  \n</title></head></html>";
        assert_eq!(extract_title(html).unwrap(), "Στραγγιστό Γιαούρτι 2% | Lidl");
    }

    #[test]
    fn accepts_attributes_and_uppercase_tags() {
        let html = r#"<HEAD><TITLE data-rh="true">Greek Yogurt</TITLE></HEAD>"#;
        assert_eq!(extract_title(html).unwrap(), "Greek Yogurt");
    }

    #[test]
    fn decodes_common_entities() {
        let html = "<title>Fish &amp; Chips &quot;Deluxe&quot;</title>";
        assert_eq!(extract_title(html).unwrap(), "Fish & Chips \"Deluxe\"");
    }

    #[test]
    fn does_not_double_decode_escaped_ampersand() {
        let html = "<title>a &amp;lt; b</title>";
        assert_eq!(extract_title(html).unwrap(), "a &lt; b");
    }

    #[test]
    fn missing_title_fails() {
        let err = extract_title("<html><body>no title</body></html>").unwrap_err();
        assert_eq!(err, TitleError::OpeningTag(0));
    }

    #[test]
    fn duplicate_title_fails() {
        let html = "<title>One</title><svg><title>Two</title></svg>";
        assert_eq!(extract_title(html).unwrap_err(), TitleError::OpeningTag(2));
    }

    #[test]
    fn unclosed_title_fails() {
        assert_eq!(
            extract_title("<title>Greek Yogurt").unwrap_err(),
            TitleError::ClosingTag(0)
        );
    }

    #[test]
    fn closing_before_opening_fails() {
        assert_eq!(
            extract_title("</title>Greek Yogurt<title>").unwrap_err(),
            TitleError::OutOfOrder
        );
    }

    #[test]
    fn blank_title_fails() {
        assert_eq!(
            extract_title("<title>   </title>").unwrap_err(),
            TitleError::Empty
        );
    }

    #[test]
    fn titlebar_tag_is_not_a_title() {
        let html = "<titlebar>x</titlebar><title>Real</title>";
        assert_eq!(extract_title(html).unwrap(), "Real");
    }
}
