use std::sync::OnceLock;

use base64::Engine;

use crate::util::{classify_content, plain_text_to_html, ContentFormat};
use crate::xml::ElementWrapper;

/// The `<atom:content>` of an entry.
///
/// The payload format is derived from `type` and `src` on first use and
/// cached for the lifetime of the view.
#[derive(Debug, Clone, Default)]
pub struct Content {
    wrapper: ElementWrapper,
    format: OnceLock<ContentFormat>,
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.wrapper == other.wrapper
    }
}

impl From<ElementWrapper> for Content {
    fn from(wrapper: ElementWrapper) -> Self {
        Self {
            wrapper,
            format: OnceLock::new(),
        }
    }
}

impl Content {
    pub fn is_null(&self) -> bool {
        self.wrapper.is_null()
    }

    /// The raw `type` attribute.
    pub fn content_type(&self) -> String {
        self.wrapper.attribute("type")
    }

    /// External content location, resolved against `xml:base`.
    pub fn src(&self) -> String {
        self.wrapper.complete_uri(&self.wrapper.attribute("src"))
    }

    pub fn format(&self) -> ContentFormat {
        *self.format.get_or_init(|| {
            let ty = self
                .wrapper
                .element()
                .and_then(|el| el.attribute("type"));
            classify_content(ty, &self.src())
        })
    }

    /// True when the payload is inline rather than referenced by `src`.
    pub fn is_contained(&self) -> bool {
        self.src().is_empty()
    }

    pub fn is_binary(&self) -> bool {
        self.format() == ContentFormat::Binary
    }

    pub fn is_plain_text(&self) -> bool {
        self.format() == ContentFormat::PlainText
    }

    pub fn is_escaped_html(&self) -> bool {
        self.format() == ContentFormat::EscapedHtml
    }

    pub fn is_xml(&self) -> bool {
        self.format() == ContentFormat::EmbeddedXml
    }

    /// The payload as HTML; empty for binary content.
    pub fn as_string(&self) -> String {
        match self.format() {
            ContentFormat::PlainText => plain_text_to_html(&self.wrapper.text()),
            ContentFormat::EscapedHtml => self.wrapper.text().trim().to_string(),
            ContentFormat::EmbeddedXml => self.wrapper.child_nodes_as_xml(),
            ContentFormat::Binary => String::new(),
        }
    }

    /// Decoded bytes of base64 binary content; empty for textual formats or
    /// invalid base64.
    pub fn as_bytes(&self) -> Vec<u8> {
        if !self.is_binary() {
            return Vec::new();
        }
        let text = self.wrapper.text();
        let cleaned: String = text.split_whitespace().collect();
        match base64::engine::general_purpose::STANDARD.decode(cleaned) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "Undecodable binary content");
                Vec::new()
            }
        }
    }
}
