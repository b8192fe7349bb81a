use std::sync::{Arc, OnceLock};

use super::elements::{DublinCore, Image, SyndicationInfo, TextInput};
use super::item::Item;
use super::model::Model;
use super::node::{Node, NodeId, Resource};
use super::vocab::rss;
use crate::util::{normalize, string_contains_markup};

/// Default number of items sampled for markup detection.
pub const DEFAULT_MARKUP_SAMPLE_SIZE: usize = 10;

/// A resource together with the model it lives in.
///
/// Base of every RDF view type. A wrapper around a null resource answers
/// every query with an empty value.
#[derive(Debug, Clone)]
pub struct ResourceWrapper {
    model: Arc<Model>,
    resource: Resource,
}

impl Default for ResourceWrapper {
    fn default() -> Self {
        Self::new(Arc::new(Model::new()), Resource::null())
    }
}

impl ResourceWrapper {
    pub fn new(model: Arc<Model>, resource: Resource) -> Self {
        Self { model, resource }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub(crate) fn shared_model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn is_null(&self) -> bool {
        self.resource.is_null()
    }

    /// Text of the first `predicate` statement, `""` if there is none.
    pub fn text(&self, predicate: &str) -> String {
        self.resource
            .property(&self.model, predicate)
            .as_string(&self.model)
    }

    /// Text of every `predicate` statement, in insertion order.
    pub fn texts(&self, predicate: &str) -> Vec<String> {
        self.resource
            .properties(&self.model, predicate)
            .iter()
            .map(|st| st.as_string(&self.model))
            .collect()
    }

    /// The object of the first `predicate` statement as a wrapped resource.
    pub fn related(&self, predicate: &str) -> ResourceWrapper {
        let res = self
            .resource
            .property(&self.model, predicate)
            .as_resource(&self.model);
        ResourceWrapper::new(Arc::clone(&self.model), res)
    }
}

impl PartialEq for ResourceWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
    }
}

/// An RSS 1.0 (or normalized RSS 0.9) channel.
#[derive(Debug, Clone, Default)]
pub struct Document {
    wrapper: ResourceWrapper,
    sample_size: usize,
    title_markup: OnceLock<bool>,
    description_markup: OnceLock<bool>,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.wrapper == other.wrapper
    }
}

impl Document {
    pub fn new(model: Arc<Model>, channel: Resource) -> Self {
        Self::with_sample_size(model, channel, DEFAULT_MARKUP_SAMPLE_SIZE)
    }

    pub(crate) fn with_sample_size(model: Arc<Model>, channel: Resource, sample_size: usize) -> Self {
        Self {
            wrapper: ResourceWrapper::new(model, channel),
            sample_size,
            title_markup: OnceLock::new(),
            description_markup: OnceLock::new(),
        }
    }

    /// A document without a channel. [`Document::is_valid`] returns false.
    pub fn invalid() -> Self {
        Self {
            sample_size: DEFAULT_MARKUP_SAMPLE_SIZE,
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.wrapper.is_null()
    }

    pub fn resource(&self) -> &Resource {
        self.wrapper.resource()
    }

    pub fn model(&self) -> &Model {
        self.wrapper.model()
    }

    pub fn title(&self) -> String {
        normalize(&self.wrapper.text(rss::TITLE))
    }

    pub fn description(&self) -> String {
        normalize(&self.wrapper.text(rss::DESCRIPTION))
    }

    pub fn link(&self) -> String {
        self.wrapper.text(rss::LINK)
    }

    pub fn dc(&self) -> DublinCore {
        DublinCore::new(self.wrapper.clone())
    }

    pub fn syn(&self) -> SyndicationInfo {
        SyndicationInfo::new(self.wrapper.clone())
    }

    pub fn image(&self) -> Image {
        Image::new(self.wrapper.related(rss::IMAGE))
    }

    pub fn text_input(&self) -> TextInput {
        TextInput::new(self.wrapper.related(rss::TEXTINPUT))
    }

    /// Ids of the `rss:items` sequence members, in sequence order.
    fn item_sequence(&self) -> Vec<NodeId> {
        let model = self.wrapper.model();
        match self.resource().property(model, rss::ITEMS).object(model) {
            Node::Sequence(seq) => seq
                .items(model)
                .iter()
                .filter(|n| n.is_resource())
                .map(Node::id)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Items without per-feed formatting info.
    fn raw_items(&self) -> Vec<Resource> {
        let model = self.wrapper.model();
        let mut items = model.resources_with_type(rss::ITEM);
        items.sort_by(|a, b| a.uri().cmp(b.uri()));

        let sequence = self.item_sequence();
        if !sequence.is_empty() {
            // Stable: items missing from the sequence keep URI order, first.
            items.sort_by_key(|item| sequence.iter().position(|id| *id == item.id()));
        }
        items
    }

    /// Items ordered by their position in the channel's `rss:items`
    /// sequence. Items not listed there come first, sorted by URI.
    pub fn items(&self) -> Vec<Item> {
        let title_markup = self.item_title_contains_markup();
        let description_markup = self.item_description_contains_markup();
        self.raw_items()
            .into_iter()
            .map(|res| {
                Item::new(ResourceWrapper::new(Arc::clone(self.wrapper.shared_model()), res))
                    .with_format_info(title_markup, description_markup)
            })
            .collect()
    }

    fn sample_contains_markup(&self, predicate: &str) -> bool {
        let model = self.wrapper.model();
        let sample: String = self
            .raw_items()
            .iter()
            .take(self.sample_size)
            .map(|res| res.property(model, predicate).as_string(model))
            .collect();
        string_contains_markup(&sample)
    }

    /// Whether item titles contain markup, judged once from the first items.
    pub fn item_title_contains_markup(&self) -> bool {
        *self
            .title_markup
            .get_or_init(|| self.sample_contains_markup(rss::TITLE))
    }

    /// Whether item descriptions contain markup, judged once from the first items.
    pub fn item_description_contains_markup(&self) -> bool {
        *self
            .description_markup
            .get_or_init(|| self.sample_contains_markup(rss::DESCRIPTION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::node::Property;
    use crate::rdf::vocab::rdf;

    fn typed(model: &mut Model, uri: &str, ty: &str) -> Resource {
        let res = model.create_resource(uri);
        let type_pred = model.create_property(rdf::TYPE);
        let ty = model.create_resource(ty);
        model.add_statement(&res, &type_pred, &ty.into());
        res
    }

    fn literal(model: &mut Model, subject: &Resource, pred: &str, text: &str) {
        let p: Property = model.create_property(pred);
        let lit = model.create_literal(text);
        model.add_statement(subject, &p, &lit.into());
    }

    #[test]
    fn test_items_follow_sequence_then_uri() {
        let mut model = Model::new();
        let channel = typed(&mut model, "http://c/", rss::CHANNEL);
        let a = typed(&mut model, "http://c/a", rss::ITEM);
        let b = typed(&mut model, "http://c/b", rss::ITEM);
        typed(&mut model, "http://c/z-unlisted", rss::ITEM);
        typed(&mut model, "http://c/0-unlisted", rss::ITEM);

        let seq = model.create_sequence("");
        let items_pred = model.create_property(rss::ITEMS);
        model.add_statement(&channel, &items_pred, &seq.clone().into());
        model.sequence_append(&seq, &b.into());
        model.sequence_append(&seq, &a.into());

        let doc = Document::new(Arc::new(model), channel);
        let uris: Vec<_> = doc.items().iter().map(|i| i.resource().uri().to_string()).collect();
        assert_eq!(
            uris,
            vec!["http://c/0-unlisted", "http://c/z-unlisted", "http://c/b", "http://c/a"]
        );
    }

    #[test]
    fn test_items_sorted_by_uri_without_sequence() {
        let mut model = Model::new();
        let channel = typed(&mut model, "http://c/", rss::CHANNEL);
        typed(&mut model, "http://c/2", rss::ITEM);
        typed(&mut model, "http://c/1", rss::ITEM);
        let doc = Document::new(Arc::new(model), channel);
        let uris: Vec<_> = doc.items().iter().map(|i| i.resource().uri().to_string()).collect();
        assert_eq!(uris, vec!["http://c/1", "http://c/2"]);
    }

    #[test]
    fn test_markup_sampling_is_memoized_per_document() {
        let mut model = Model::new();
        let channel = typed(&mut model, "http://c/", rss::CHANNEL);
        let item = typed(&mut model, "http://c/1", rss::ITEM);
        literal(&mut model, &item, rss::TITLE, "Fish <b>and</b> Chips");
        literal(&mut model, &item, rss::DESCRIPTION, "a < b");
        let doc = Document::new(Arc::new(model), channel);

        assert!(doc.item_title_contains_markup());
        assert!(!doc.item_description_contains_markup());
        let items = doc.items();
        assert_eq!(items[0].title(), "Fish <b>and</b> Chips");
        assert_eq!(items[0].description(), "a &lt; b");
    }

    #[test]
    fn test_channel_fields_are_normalized() {
        let mut model = Model::new();
        let channel = typed(&mut model, "http://c/", rss::CHANNEL);
        literal(&mut model, &channel, rss::TITLE, " Fish & Chips ");
        literal(&mut model, &channel, rss::LINK, "http://c/");
        let doc = Document::new(Arc::new(model), channel);
        assert!(doc.is_valid());
        assert_eq!(doc.title(), "Fish &amp; Chips");
        assert_eq!(doc.link(), "http://c/");
        assert!(doc.image().is_null());
    }

    #[test]
    fn test_invalid_document_is_empty() {
        let doc = Document::invalid();
        assert!(!doc.is_valid());
        assert!(doc.items().is_empty());
        assert_eq!(doc.title(), "");
    }
}
