use std::collections::BTreeMap;
use std::sync::Arc;

use super::document::{Document, DEFAULT_MARKUP_SAMPLE_SIZE};
use super::model::Model;
use super::model_maker::ModelMaker;
use super::node::Resource;
use super::vocab::{internal, rdf, rss, rss09};
use crate::feed::{FeedParser, SpecificDocument};
use crate::source::DocumentSource;
use crate::xml::{Element, XmlDocument, XmlNode};

/// Parser for RSS 1.0 and RSS 0.9 (RDF-based) feeds.
///
/// RSS 0.9 graphs are rewritten into RSS 1.0 vocabulary, and their items,
/// which carry neither URIs nor an ordering, get an `rss:items` sequence in
/// document order.
#[derive(Debug, Clone)]
pub struct RdfParser {
    markup_sample_size: usize,
}

impl Default for RdfParser {
    fn default() -> Self {
        Self::new(DEFAULT_MARKUP_SAMPLE_SIZE)
    }
}

impl RdfParser {
    pub fn new(markup_sample_size: usize) -> Self {
        Self { markup_sample_size }
    }

    /// Parses the source into an RDF document; invalid if no channel is found.
    pub fn parse_document(&self, source: &DocumentSource) -> Document {
        let Some(doc) = source.document() else {
            return Document::invalid();
        };

        let doc = add_enumeration(doc);
        let mut model = ModelMaker.create_from_xml(&doc);

        if !model.resources_with_type(rss09::CHANNEL).is_empty() {
            tracing::debug!(url = %source.url(), "Normalizing RSS 0.9 graph to RSS 1.0");
            map_09_to_10(&mut model);
            add_sequence_for_09(&mut model);
        }

        match model.resources_with_type(rss::CHANNEL).into_iter().next() {
            Some(channel) => Document::with_sample_size(Arc::new(model), channel, self.markup_sample_size),
            None => Document::invalid(),
        }
    }
}

impl FeedParser for RdfParser {
    fn format(&self) -> &str {
        "rdf"
    }

    fn accept(&self, source: &DocumentSource) -> bool {
        source
            .document()
            .is_some_and(|doc| doc.root().namespace() == rdf::NAMESPACE)
    }

    fn parse(&self, source: &DocumentSource) -> SpecificDocument {
        SpecificDocument::Rdf(self.parse_document(source))
    }
}

/// Appends an `itemIndex` element holding its document position to every
/// RSS 0.9 `<item>`. Documents without 0.9 items are returned unchanged.
fn add_enumeration(doc: &XmlDocument) -> XmlDocument {
    if doc.root().descendants_ns(rss09::NAMESPACE, "item").is_empty() {
        return doc.clone();
    }
    let mut counter = 0usize;
    XmlDocument::from_root(enumerate(doc.root(), &mut counter))
}

fn enumerate(el: &Element, counter: &mut usize) -> Element {
    let mut copy = el.renamed(el.namespace(), el.local_name());
    let index = if el.is(rss09::NAMESPACE, "item") {
        let i = *counter;
        *counter += 1;
        Some(i)
    } else {
        None
    };

    for node in el.children() {
        match node {
            XmlNode::Element(child) => copy.push_element(enumerate(child, counter)),
            other => copy.push_node(other.clone()),
        }
    }

    if let Some(i) = index {
        copy.push_element(Element::new(internal::NAMESPACE, internal::ITEM_INDEX_LOCAL).with_text(&i.to_string()));
    }
    copy
}

/// Re-emits RSS 0.9 properties under their RSS 1.0 names and retypes the channel.
fn map_09_to_10(model: &mut Model) {
    for stmt in model.statements() {
        let predicate = stmt.predicate(model);
        let Some((_, rss10)) = rss09::TO_RSS10.iter().find(|(old, _)| *old == predicate.uri()) else {
            continue;
        };
        let subject = stmt.subject(model);
        let object = stmt.object(model);
        let mapped = model.create_property(rss10);
        model.add_statement(&subject, &mapped, &object);
    }

    if let Some(channel) = model.resources_with_type(rss09::CHANNEL).into_iter().next() {
        let old_type = model.create_resource(rss09::CHANNEL);
        model.remove_statement(&channel, rdf::TYPE, &old_type.into());
        let type_pred = model.create_property(rdf::TYPE);
        let new_type = model.create_resource(rss::CHANNEL);
        model.add_statement(&channel, &type_pred, &new_type.into());
    }
}

/// Orders RSS 0.9 items by their injected position and links them to the
/// channel through a new `rss:items` sequence.
fn add_sequence_for_09(model: &mut Model) {
    let items = model.resources_with_type(rss09::ITEM);
    if items.is_empty() {
        return;
    }
    let Some(channel) = model.resources_with_type(rss::CHANNEL).into_iter().next() else {
        return;
    };

    let mut sorted: BTreeMap<u32, Resource> = BTreeMap::new();
    for item in items {
        let index = item.property(model, internal::ITEM_INDEX).as_string(model);
        if let Ok(n) = index.trim().parse::<u32>() {
            sorted.insert(n, item);
        }
    }

    let seq = model.create_sequence("");
    let items_pred = model.create_property(rss::ITEMS);
    model.add_statement(&channel, &items_pred, &seq.clone().into());

    let type_pred = model.create_property(rdf::TYPE);
    let item_type = model.create_resource(rss::ITEM);
    let li = model.create_property(rdf::LI);
    for item in sorted.into_values() {
        model.sequence_append(&seq, &item.clone().into());
        model.add_statement(&item, &type_pred, &item_type.clone().into());
        model.add_statement(&seq, &li, &item.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RSS09: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns="http://my.netscape.com/rdf/simple/0.9/">
  <channel>
    <title>Old School</title>
    <link>http://example.com/</link>
    <description>Netscape era</description>
  </channel>
  <image><title>Logo</title><url>http://example.com/logo.gif</url><link>http://example.com/</link></image>
  <item><title>C</title><link>http://example.com/c</link></item>
  <item><title>A</title><link>http://example.com/a</link></item>
  <item><title>B</title><link>http://example.com/b</link></item>
</rdf:RDF>"#;

    #[test]
    fn test_accept_requires_rdf_root() {
        let parser = RdfParser::default();
        assert!(parser.accept(&DocumentSource::new(RSS09, "")));
        assert!(!parser.accept(&DocumentSource::new("<rss version=\"2.0\"/>", "")));
        assert!(!parser.accept(&DocumentSource::new("not xml", "")));
        assert_eq!(parser.format(), "rdf");
    }

    #[test]
    fn test_rss09_keeps_document_order() {
        let doc = RdfParser::default().parse_document(&DocumentSource::new(RSS09, ""));
        assert!(doc.is_valid());
        assert_eq!(doc.title(), "Old School");
        assert_eq!(doc.link(), "http://example.com/");
        let titles: Vec<_> = doc.items().iter().map(|i| i.title()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
        let links: Vec<_> = doc.items().iter().map(|i| i.link()).collect();
        assert_eq!(
            links,
            vec!["http://example.com/c", "http://example.com/a", "http://example.com/b"]
        );
    }

    #[test]
    fn test_rss09_channel_is_retyped() {
        let doc = RdfParser::default().parse_document(&DocumentSource::new(RSS09, ""));
        let model = doc.model();
        assert!(model.resources_with_type(rss09::CHANNEL).is_empty());
        assert_eq!(model.resources_with_type(rss::CHANNEL).len(), 1);
    }

    #[test]
    fn test_enumeration_injects_positions() {
        let xml = XmlDocument::parse_str(RSS09).unwrap();
        let enumerated = add_enumeration(&xml);
        let indexes: Vec<_> = enumerated
            .root()
            .descendants_ns(internal::NAMESPACE, internal::ITEM_INDEX_LOCAL)
            .iter()
            .map(|el| el.text())
            .collect();
        assert_eq!(indexes, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_no_channel_is_invalid() {
        let doc = RdfParser::default().parse_document(&DocumentSource::new(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#,
            "",
        ));
        assert!(!doc.is_valid());
    }
}
