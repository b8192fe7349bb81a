use std::sync::Arc;

use super::elements::wrap_all;
use super::{extract_atom_text, Category, Content, Link, Person, Source, ATOM1_NAMESPACE};
use crate::util::{parse_date, DateFormat};
use crate::xml::{Element, ElementWrapper};

const HANDLED: [(&str, &str); 12] = [
    (ATOM1_NAMESPACE, "author"),
    (ATOM1_NAMESPACE, "contributor"),
    (ATOM1_NAMESPACE, "category"),
    (ATOM1_NAMESPACE, "id"),
    (ATOM1_NAMESPACE, "link"),
    (ATOM1_NAMESPACE, "rights"),
    (ATOM1_NAMESPACE, "source"),
    (ATOM1_NAMESPACE, "published"),
    (ATOM1_NAMESPACE, "updated"),
    (ATOM1_NAMESPACE, "summary"),
    (ATOM1_NAMESPACE, "title"),
    (ATOM1_NAMESPACE, "content"),
];

/// An `<atom:entry>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    wrapper: ElementWrapper,
    feed_authors: Vec<Person>,
}

impl From<ElementWrapper> for Entry {
    fn from(wrapper: ElementWrapper) -> Self {
        Self {
            wrapper,
            feed_authors: Vec::new(),
        }
    }
}

impl Entry {
    pub(crate) fn with_feed_authors(mut self, authors: Vec<Person>) -> Self {
        self.feed_authors = authors;
        self
    }

    pub fn is_null(&self) -> bool {
        self.wrapper.is_null()
    }

    /// The entry's authors, falling back to those of its `<source>` and then
    /// to the authors of the containing feed.
    pub fn authors(&self) -> Vec<Person> {
        let own: Vec<Person> = wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "author"));
        if !own.is_empty() {
            return own;
        }
        let from_source = self.source().authors();
        if !from_source.is_empty() {
            return from_source;
        }
        self.feed_authors.clone()
    }

    pub fn contributors(&self) -> Vec<Person> {
        wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "contributor"))
    }

    pub fn categories(&self) -> Vec<Category> {
        wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "category"))
    }

    pub fn id(&self) -> String {
        self.wrapper.child_text(ATOM1_NAMESPACE, "id")
    }

    pub fn links(&self) -> Vec<Link> {
        wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "link"))
    }

    pub fn rights(&self) -> String {
        extract_atom_text(&self.wrapper, "rights")
    }

    pub fn source(&self) -> Source {
        self.wrapper.first_child(ATOM1_NAMESPACE, "source").into()
    }

    pub fn published(&self) -> i64 {
        parse_date(&self.wrapper.child_text(ATOM1_NAMESPACE, "published"), DateFormat::Iso8601)
    }

    pub fn updated(&self) -> i64 {
        parse_date(&self.wrapper.child_text(ATOM1_NAMESPACE, "updated"), DateFormat::Iso8601)
    }

    pub fn summary(&self) -> String {
        extract_atom_text(&self.wrapper, "summary")
    }

    pub fn title(&self) -> String {
        extract_atom_text(&self.wrapper, "title")
    }

    pub fn content(&self) -> Content {
        self.wrapper.first_child(ATOM1_NAMESPACE, "content").into()
    }

    /// `xml:lang` in scope for the entry.
    pub fn language(&self) -> String {
        self.wrapper.xml_lang()
    }

    /// Children that no accessor above covers, e.g. extension elements.
    pub fn unhandled_elements(&self) -> Vec<Arc<Element>> {
        self.wrapper.unhandled_elements(&HANDLED)
    }

    pub(crate) fn wrapper(&self) -> &ElementWrapper {
        &self.wrapper
    }
}
