/// How the payload of a content element is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFormat {
    /// Plain text, to be escaped before display as HTML.
    PlainText,
    /// HTML carried as escaped text.
    EscapedHtml,
    /// Inline XML (typically XHTML) carried as child elements.
    EmbeddedXml,
    /// Base64-encoded binary data, or anything else.
    Binary,
}

/// Media types treated as inline XML (RFC 3023 plus `xhtml`).
const XML_TYPES: [&str; 8] = [
    "xhtml",
    "application/xhtml+xml",
    "text/xml",
    "application/xml",
    "text/xml-external-parsed-entity",
    "application/xml-external-parsed-entity",
    "application/xml-dtd",
    "text/x-dtd",
];

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Classifies a content element from its `type` attribute and `src` URI.
///
/// An absent type with no external source counts as `"text"`. The checks
/// run in a fixed order: HTML, then plain text (`text` or any `text/*`
/// except `text/xml*`), then the XML media types (including any `+xml` or
/// `/xml` suffix), and everything else is binary.
pub fn classify_content(content_type: Option<&str>, src: &str) -> ContentFormat {
    let content_type = match content_type {
        None if src.is_empty() => "text",
        None => "",
        Some(t) => t,
    };

    if content_type == "html" || content_type == "text/html" {
        return ContentFormat::EscapedHtml;
    }

    if content_type == "text"
        || (starts_with_ignore_case(content_type, "text/")
            && !starts_with_ignore_case(content_type, "text/xml"))
    {
        return ContentFormat::PlainText;
    }

    if XML_TYPES.contains(&content_type)
        || ends_with_ignore_case(content_type, "+xml")
        || ends_with_ignore_case(content_type, "/xml")
    {
        return ContentFormat::EmbeddedXml;
    }

    ContentFormat::Binary
}
