//! Plain-text to HTML conversion for served evaluation bodies.

/// Render plain text as minimal HTML: entities escaped, blank-line
/// separated paragraphs wrapped in `<p>`, single newlines kept as
/// `<br/>`.
pub fn plain_text_to_html(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    escaped
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| format!("<p>{}</p>", paragraph.replace('\n', "<br/>")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_paragraphs() {
        assert_eq!(
            plain_text_to_html("first\n\nsecond"),
            "<p>first</p>\n<p>second</p>"
        );
    }

    #[test]
    fn keeps_single_newlines_as_breaks() {
        assert_eq!(plain_text_to_html("a\nb"), "<p>a<br/>b</p>");
    }

    #[test]
    fn escapes_entities() {
        assert_eq!(plain_text_to_html("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(plain_text_to_html(""), "");
        assert_eq!(plain_text_to_html("\n\n"), "");
    }
}
