use std::sync::Arc;

use super::elements::wrap_all;
use super::{extract_atom_text, Category, Entry, Generator, Link, Person, ATOM1_NAMESPACE};
use crate::util::{parse_date, DateFormat};
use crate::xml::{Element, ElementWrapper};

const HANDLED: [(&str, &str); 13] = [
    (ATOM1_NAMESPACE, "author"),
    (ATOM1_NAMESPACE, "contributor"),
    (ATOM1_NAMESPACE, "category"),
    (ATOM1_NAMESPACE, "generator"),
    (ATOM1_NAMESPACE, "icon"),
    (ATOM1_NAMESPACE, "logo"),
    (ATOM1_NAMESPACE, "id"),
    (ATOM1_NAMESPACE, "rights"),
    (ATOM1_NAMESPACE, "title"),
    (ATOM1_NAMESPACE, "subtitle"),
    (ATOM1_NAMESPACE, "updated"),
    (ATOM1_NAMESPACE, "link"),
    (ATOM1_NAMESPACE, "entry"),
];

/// An Atom `<feed>` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    wrapper: ElementWrapper,
}

impl From<ElementWrapper> for FeedDocument {
    fn from(wrapper: ElementWrapper) -> Self {
        Self { wrapper }
    }
}

impl FeedDocument {
    pub fn is_valid(&self) -> bool {
        !self.wrapper.is_null()
    }

    pub fn authors(&self) -> Vec<Person> {
        wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "author"))
    }

    pub fn contributors(&self) -> Vec<Person> {
        wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "contributor"))
    }

    pub fn categories(&self) -> Vec<Category> {
        wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "category"))
    }

    pub fn generator(&self) -> Generator {
        self.wrapper.first_child(ATOM1_NAMESPACE, "generator").into()
    }

    /// Icon URL resolved against `xml:base`, `""` if there is none.
    pub fn icon(&self) -> String {
        let path = self.wrapper.child_text(ATOM1_NAMESPACE, "icon");
        if path.is_empty() {
            return String::new();
        }
        self.wrapper.complete_uri(&path)
    }

    pub fn logo(&self) -> String {
        self.wrapper
            .complete_uri(&self.wrapper.child_text(ATOM1_NAMESPACE, "logo"))
    }

    pub fn id(&self) -> String {
        self.wrapper.child_text(ATOM1_NAMESPACE, "id")
    }

    pub fn rights(&self) -> String {
        extract_atom_text(&self.wrapper, "rights")
    }

    pub fn title(&self) -> String {
        extract_atom_text(&self.wrapper, "title")
    }

    pub fn subtitle(&self) -> String {
        extract_atom_text(&self.wrapper, "subtitle")
    }

    pub fn updated(&self) -> i64 {
        parse_date(&self.wrapper.child_text(ATOM1_NAMESPACE, "updated"), DateFormat::Iso8601)
    }

    pub fn links(&self) -> Vec<Link> {
        wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "link"))
    }

    /// `xml:lang` of the feed element.
    pub fn language(&self) -> String {
        self.wrapper.xml_lang()
    }

    /// Entries in document order. Each one knows the feed's authors so it
    /// can fall back to them.
    pub fn entries(&self) -> Vec<Entry> {
        let authors = self.authors();
        self.wrapper
            .children(ATOM1_NAMESPACE, "entry")
            .into_iter()
            .map(|el| Entry::from(ElementWrapper::new(el)).with_feed_authors(authors.clone()))
            .collect()
    }

    pub fn unhandled_elements(&self) -> Vec<Arc<Element>> {
        self.wrapper.unhandled_elements(&HANDLED)
    }
}

/// A standalone Atom `<entry>` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDocument {
    wrapper: ElementWrapper,
}

impl From<ElementWrapper> for EntryDocument {
    fn from(wrapper: ElementWrapper) -> Self {
        Self { wrapper }
    }
}

impl EntryDocument {
    pub fn is_valid(&self) -> bool {
        !self.wrapper.is_null()
    }

    pub fn entry(&self) -> Entry {
        Entry::from(self.wrapper.clone())
    }
}
