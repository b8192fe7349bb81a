use std::sync::Arc;

use super::{EntryDocument, FeedDocument, ATOM03_NAMESPACE, ATOM1_NAMESPACE};
use crate::feed::{FeedParser, SpecificDocument};
use crate::source::DocumentSource;
use crate::util::{classify_content, ContentFormat};
use crate::xml::{Element, ElementWrapper, XmlNode};

/// Elements renamed between Atom 0.3 and 1.0.
const RENAMED_03: [(&str, &str); 5] = [
    ("issued", "published"),
    ("modified", "updated"),
    ("url", "uri"),
    ("copyright", "rights"),
    ("tagline", "subtitle"),
];

const TEXT_CONSTRUCTS: [&str; 4] = ["title", "rights", "subtitle", "summary"];

/// Parser for Atom 1.0 feeds and entry documents. Atom 0.3 feeds are
/// converted to 1.0 before wrapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomParser;

impl AtomParser {
    pub fn parse_document(&self, source: &DocumentSource) -> SpecificDocument {
        let Some(doc) = source.document() else {
            return SpecificDocument::AtomFeed(FeedDocument::default());
        };

        let mut root = Arc::clone(doc.root());
        if root.namespace() == ATOM03_NAMESPACE || root.attribute("version") == Some("0.3") {
            tracing::debug!(url = %source.url(), "Converting Atom 0.3 document to 1.0");
            root = Arc::new(convert_03(&root));
        }

        if root.is(ATOM1_NAMESPACE, "feed") {
            SpecificDocument::AtomFeed(FeedDocument::from(ElementWrapper::new(root)))
        } else if root.is(ATOM1_NAMESPACE, "entry") {
            SpecificDocument::AtomEntry(EntryDocument::from(ElementWrapper::new(root)))
        } else {
            SpecificDocument::AtomFeed(FeedDocument::default())
        }
    }
}

impl FeedParser for AtomParser {
    fn format(&self) -> &str {
        "atom"
    }

    fn accept(&self, source: &DocumentSource) -> bool {
        source.document().is_some_and(|doc| {
            let ns = doc.root().namespace();
            ns == ATOM1_NAMESPACE || ns == ATOM03_NAMESPACE
        })
    }

    fn parse(&self, source: &DocumentSource) -> SpecificDocument {
        self.parse_document(source)
    }
}

/// Rewrites an Atom 0.3 subtree into Atom 1.0 vocabulary.
fn convert_03(el: &Element) -> Element {
    let is_03 = el.namespace() == ATOM03_NAMESPACE;
    let namespace = if is_03 { ATOM1_NAMESPACE } else { el.namespace() };
    let local_name = if is_03 {
        RENAMED_03
            .iter()
            .find(|(old, _)| *old == el.local_name())
            .map_or(el.local_name(), |(_, new)| new)
    } else {
        el.local_name()
    };

    let mut copy = el.renamed(namespace, local_name);
    copy.rebind_namespace(ATOM03_NAMESPACE, ATOM1_NAMESPACE);

    if namespace == ATOM1_NAMESPACE && TEXT_CONSTRUCTS.contains(&local_name) {
        // 1.0 text constructs only know text, html and xhtml
        let old_type = el.attribute("type").unwrap_or("text/plain");
        let new_type = match classify_content(Some(old_type), "") {
            ContentFormat::EmbeddedXml => "xhtml",
            ContentFormat::EscapedHtml => "html",
            ContentFormat::PlainText | ContentFormat::Binary => "text",
        };
        copy.set_attribute("type", new_type);
    } else if namespace == ATOM1_NAMESPACE && local_name == "generator" {
        if let Some(url) = el.attribute("url") {
            copy.set_attribute("uri", url);
        }
    }

    for node in el.children() {
        match node {
            XmlNode::Element(child) => copy.push_element(convert_03(child)),
            other => copy.push_node(other.clone()),
        }
    }
    copy
}
