//! Format-agnostic feed model and the dispatch that produces it.
//!
//! This module ties the format parsers together:
//!
//! - **Unified model**: [`Feed`], [`Item`], [`Person`], [`Category`],
//!   [`Enclosure`] and [`Image`] look the same whether the source was Atom,
//!   RSS 2 or RDF
//! - **Specific documents**: [`SpecificDocument`] / [`SpecificItem`] keep
//!   the format-specific view reachable from the unified one
//! - **Dispatch**: [`ParserCollection`] probes registered [`FeedParser`]s
//!   and hands the accepted document to the format's [`Mapper`]
//!
//! # Architecture
//!
//! - [`collection`] - parser registry, probing, last-error bookkeeping
//! - [`mapper`] - per-format mapping rules into the unified model
//!
//! # Example
//!
//! ```
//! use syndication::feed::ParserCollection;
//! use syndication::DocumentSource;
//!
//! let source = DocumentSource::new(
//!     r#"<rss version="2.0"><channel><title>News</title></channel></rss>"#,
//!     "http://example.com/rss.xml",
//! );
//! let mut collection: ParserCollection = ParserCollection::default();
//! let feed = collection.parse(&source, None).unwrap();
//! assert_eq!(feed.title, "News");
//! ```

pub mod collection;
pub mod mapper;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use collection::{FeedParser, Mapper, ParserCollection};
pub use mapper::{AtomMapper, RdfMapper, Rss2Mapper};

use crate::xml::Element;
use crate::{atom, rdf, rss2};

/// Elements no accessor interprets, keyed by namespace URI + local name.
pub type AdditionalProperties = BTreeMap<String, Vec<Arc<Element>>>;

pub(crate) fn additional_properties(elements: Vec<Arc<Element>>) -> AdditionalProperties {
    let mut map = AdditionalProperties::new();
    for el in elements {
        map.entry(el.expanded_name()).or_default().push(el);
    }
    map
}

// ============================================================================
// Specific documents
// ============================================================================

/// A parsed document in its format-specific form.
#[derive(Debug, Clone)]
pub enum SpecificDocument {
    AtomFeed(atom::FeedDocument),
    AtomEntry(atom::EntryDocument),
    Rss2(rss2::Document),
    Rdf(rdf::Document),
}

impl SpecificDocument {
    /// False when the parser could not find the document element it expects.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::AtomFeed(doc) => doc.is_valid(),
            Self::AtomEntry(doc) => doc.is_valid(),
            Self::Rss2(doc) => doc.is_valid(),
            Self::Rdf(doc) => doc.is_valid(),
        }
    }

    /// Name of the parser format that produces this kind of document.
    pub fn format(&self) -> &'static str {
        match self {
            Self::AtomFeed(_) | Self::AtomEntry(_) => "atom",
            Self::Rss2(_) => "rss2",
            Self::Rdf(_) => "rdf",
        }
    }
}

/// An item in its format-specific form.
#[derive(Debug, Clone)]
pub enum SpecificItem {
    Atom(atom::Entry),
    Rss2(rss2::Item),
    Rdf(rdf::Item),
}

// ============================================================================
// Unified model
// ============================================================================

/// An author or contributor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Person {
    pub name: String,
    pub uri: String,
    pub email: String,
}

impl Person {
    pub fn new(name: impl Into<String>, uri: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            email: email.into(),
        }
    }

    /// A person with neither name, URI nor e-mail.
    pub fn is_null(&self) -> bool {
        self.name.is_empty() && self.uri.is_empty() && self.email.is_empty()
    }
}

/// A category or tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub term: String,
    /// Categorization scheme (an IRI in Atom, the `domain` in RSS 2).
    pub scheme: String,
    /// Human-readable label; Atom only.
    pub label: String,
}

/// A media object attached to an item (podcast episode, image, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    pub title: String,
    pub mime_type: String,
    /// Size in bytes, `0` if unknown.
    pub length: u64,
    /// Playing time in seconds, `0` if unknown.
    pub duration: u32,
}

/// A feed image or icon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
    pub description: String,
    /// Pixels, `0` if unknown.
    pub width: u32,
    pub height: u32,
}

/// One entry of a [`Feed`].
///
/// Title, description and content are HTML. Dates are seconds since the
/// epoch, `0` meaning unknown.
#[derive(Debug, Clone)]
pub struct Item {
    pub title: String,
    pub link: String,
    pub description: String,
    pub content: String,
    pub date_published: i64,
    pub date_updated: i64,
    /// Native id, or `hash:` + MD5 of title, description, link and content.
    pub id: String,
    pub authors: Vec<Person>,
    pub language: String,
    pub enclosures: Vec<Enclosure>,
    pub categories: Vec<Category>,
    /// Number of comments, `-1` if unknown.
    pub comments_count: i32,
    pub comments_link: String,
    pub comments_feed: String,
    pub comment_post_uri: String,
    pub additional_properties: AdditionalProperties,
    pub specific: SpecificItem,
}

/// A feed in format-agnostic form.
#[derive(Debug, Clone)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<Item>,
    pub categories: Vec<Category>,
    pub authors: Vec<Person>,
    pub language: String,
    pub copyright: String,
    pub image: Option<Image>,
    pub icon: Option<Image>,
    pub additional_properties: AdditionalProperties,
    pub specific: SpecificDocument,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    #[test]
    fn test_person_null() {
        assert!(Person::default().is_null());
        assert!(!Person::new("", "", "a@b").is_null());
    }

    #[test]
    fn test_additional_properties_group_by_expanded_name() {
        let doc = XmlDocument::parse_str(r#"<c xmlns:x="urn:x/"><x:a>1</x:a><x:a>2</x:a><b/></c>"#).unwrap();
        let props = additional_properties(doc.root().child_elements().cloned().collect());
        assert_eq!(props.len(), 2);
        assert_eq!(props["urn:x/a"].len(), 2);
        assert_eq!(props["b"][0].local_name(), "b");
    }
}
