use std::borrow::Cow;
use std::sync::OnceLock;

use quick_xml::escape::resolve_html5_entity;
use regex::{Captures, Regex};

static ENTITY: OnceLock<Regex> = OnceLock::new();
static ENTITY_REF: OnceLock<Regex> = OnceLock::new();
static TAG: OnceLock<Regex> = OnceLock::new();
static ANY_TAG: OnceLock<Regex> = OnceLock::new();

fn entity_regex() -> &'static Regex {
    ENTITY.get_or_init(|| Regex::new(r"&[a-zA-Z0-9#]+;").expect("valid entity pattern"))
}

fn tag_regex() -> &'static Regex {
    TAG.get_or_init(|| Regex::new(r"<\w+.*/?>").expect("valid tag pattern"))
}

/// Heuristically decides whether `s` is HTML rather than plain text.
///
/// A string counts as markup if it contains something entity-shaped
/// (`&amp;`, `&#38;`) or, when it contains a `<` at all, something
/// tag-shaped (`<p>`, `<br/>`).
///
/// # Examples
///
/// ```
/// use syndication::util::is_html;
///
/// assert!(is_html("Fish &amp; Chips"));
/// assert!(is_html("<b>bold</b>"));
/// assert!(!is_html("1 < 2"));
/// ```
pub fn is_html(s: &str) -> bool {
    if entity_regex().is_match(s) {
        return true;
    }
    if !s.contains('<') {
        return false;
    }
    tag_regex().is_match(s)
}

/// Alias of [`is_html`] used by the per-feed sampling code.
pub fn string_contains_markup(s: &str) -> bool {
    is_html(s)
}

/// Resolves HTML named entities and numeric character references.
///
/// Unknown entities are left as they are.
pub fn resolve_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let re = ENTITY_REF.get_or_init(|| {
        Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("valid entity reference pattern")
    });
    re.replace_all(s, |caps: &Captures<'_>| {
        let name = &caps[1];
        let resolved = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32).map(String::from)
        } else if let Some(dec) = name.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32).map(String::from)
        } else {
            resolve_html5_entity(name).map(str::to_string)
        };
        resolved.unwrap_or_else(|| caps[0].to_string())
    })
}

/// Replaces `& " < > '` with their entities and trims the result.
pub fn escape_special_characters(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out.trim().to_string()
}

/// Replaces every `\n` with `<br/>`.
pub fn convert_newlines(s: &str) -> String {
    s.replace('\n', "<br/>")
}

/// Turns plain text into equivalent HTML: `& " <` escaped, newlines as `<br/>`.
///
/// `>` is left alone; it is harmless in HTML text and feeds often rely on it.
pub fn plain_text_to_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '\n' => out.push_str("<br/>"),
            _ => out.push(c),
        }
    }
    out.trim().to_string()
}

/// Strips tags and resolves entities. Formatting such as line breaks is lost.
pub fn html_to_plain_text(s: &str) -> String {
    let re = ANY_TAG.get_or_init(|| Regex::new(r"<[^>]*?>").expect("valid tag pattern"));
    let stripped = re.replace_all(s, "");
    resolve_entities(&stripped).trim().to_string()
}

/// Collapses runs of whitespace to single spaces and trims.
pub fn simplify_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a string of unknown kind to HTML.
///
/// Markup is trimmed and passed through; plain text is converted with
/// [`plain_text_to_html`].
pub fn normalize(s: &str) -> String {
    if is_html(s) {
        s.trim().to_string()
    } else {
        plain_text_to_html(s)
    }
}

/// Normalizes a string whose kind is known from context.
///
/// - `contains_markup`: trimmed, otherwise untouched.
/// - CDATA without markup: entities resolved, then escaped, newlines
///   converted to `<br/>`.
/// - Anything else: escaped.
pub fn normalize_with(s: &str, is_cdata: bool, contains_markup: bool) -> String {
    if contains_markup {
        s.trim().to_string()
    } else if is_cdata {
        let escaped = escape_special_characters(&resolve_entities(s));
        convert_newlines(&escaped).trim().to_string()
    } else {
        escape_special_characters(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_detection() {
        assert!(is_html("AT&amp;T"));
        assert!(is_html("&#8217;"));
        assert!(is_html("a <br/> b"));
        assert!(is_html("<p class=\"x\">text</p>"));
        assert!(!is_html("plain text"));
        assert!(!is_html("x < y and y > z"));
        assert!(!is_html("Fish & Chips"));
        assert!(!is_html(""));
    }

    #[test]
    fn test_resolve_entities() {
        assert_eq!(resolve_entities("a &amp; b"), "a & b");
        assert_eq!(resolve_entities("&#65;&#x42;&eacute;"), "ABé");
        assert_eq!(resolve_entities("&bogus; &"), "&bogus; &");
        assert!(matches!(resolve_entities("none"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape_special_characters("  <a href='x'>\"&\"</a> "),
            "&lt;a href=&apos;x&apos;&gt;&quot;&amp;&quot;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_plain_text_to_html_keeps_gt() {
        assert_eq!(plain_text_to_html(" a > b & c\nd "), "a > b &amp; c<br/>d");
    }

    #[test]
    fn test_html_to_plain_text() {
        assert_eq!(html_to_plain_text("<p>Fish &amp; <b>Chips</b></p> "), "Fish & Chips");
    }

    #[test]
    fn test_normalize_unknown_kind() {
        assert_eq!(normalize("  <b>x</b> "), "<b>x</b>");
        assert_eq!(normalize("a\nb < c"), "a<br/>b &lt; c");
    }

    #[test]
    fn test_normalize_known_kind() {
        assert_eq!(normalize_with(" <i>x</i> ", false, true), "<i>x</i>");
        assert_eq!(normalize_with("a &amp; b\nc", true, false), "a &amp; b<br/>c");
        assert_eq!(normalize_with("a & b", false, false), "a &amp; b");
    }

    #[test]
    fn test_simplify_whitespace() {
        assert_eq!(simplify_whitespace("  a \t b\n\nc "), "a b c");
    }
}
