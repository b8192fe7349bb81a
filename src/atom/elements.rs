use std::sync::Arc;

use super::{extract_atom_text, ATOM1_NAMESPACE};
use crate::util::{parse_date, DateFormat};
use crate::xml::{Element, ElementWrapper};

pub(crate) fn wrap_all<T: From<ElementWrapper>>(elements: Vec<Arc<Element>>) -> Vec<T> {
    elements.into_iter().map(|el| T::from(ElementWrapper::new(el))).collect()
}

macro_rules! element_view {
    ($name:ident) => {
        impl From<ElementWrapper> for $name {
            fn from(wrapper: ElementWrapper) -> Self {
                Self { wrapper }
            }
        }

        impl $name {
            pub fn is_null(&self) -> bool {
                self.wrapper.is_null()
            }
        }
    };
}

// ============================================================================
// Link
// ============================================================================

/// An `<atom:link>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    wrapper: ElementWrapper,
}

element_view!(Link);

impl Link {
    /// Target URI, resolved against `xml:base`.
    pub fn href(&self) -> String {
        self.wrapper.complete_uri(&self.wrapper.attribute("href"))
    }

    /// Link relation, `alternate` when unspecified.
    pub fn rel(&self) -> String {
        self.wrapper.attribute_or("rel", "alternate")
    }

    pub fn mime_type(&self) -> String {
        self.wrapper.attribute("type")
    }

    pub fn href_language(&self) -> String {
        self.wrapper.attribute("hreflang")
    }

    pub fn title(&self) -> String {
        self.wrapper.attribute("title")
    }

    /// Advisory length in bytes, `0` if absent or invalid.
    pub fn length(&self) -> u64 {
        self.wrapper.attribute("length").trim().parse().unwrap_or(0)
    }
}

// ============================================================================
// Person
// ============================================================================

/// An `<atom:author>` or `<atom:contributor>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    wrapper: ElementWrapper,
}

element_view!(Person);

impl Person {
    pub fn name(&self) -> String {
        self.wrapper.child_text(ATOM1_NAMESPACE, "name")
    }

    pub fn uri(&self) -> String {
        self.wrapper
            .complete_uri(&self.wrapper.child_text(ATOM1_NAMESPACE, "uri"))
    }

    pub fn email(&self) -> String {
        self.wrapper.child_text(ATOM1_NAMESPACE, "email")
    }
}

// ============================================================================
// Category / Generator
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    wrapper: ElementWrapper,
}

element_view!(Category);

impl Category {
    pub fn term(&self) -> String {
        self.wrapper.attribute("term")
    }

    /// Scheme IRI as written; Atom requires it to be absolute already.
    pub fn scheme(&self) -> String {
        self.wrapper.attribute("scheme")
    }

    pub fn label(&self) -> String {
        self.wrapper.attribute("label")
    }
}

/// The software that produced the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generator {
    wrapper: ElementWrapper,
}

element_view!(Generator);

impl Generator {
    pub fn name(&self) -> String {
        self.wrapper.text()
    }

    pub fn uri(&self) -> String {
        self.wrapper.complete_uri(&self.wrapper.attribute("uri"))
    }

    pub fn version(&self) -> String {
        self.wrapper.attribute("version")
    }
}

// ============================================================================
// Source
// ============================================================================

/// Metadata of the feed an entry was copied from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    wrapper: ElementWrapper,
}

element_view!(Source);

impl Source {
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

    pub fn icon(&self) -> String {
        self.wrapper.child_text(ATOM1_NAMESPACE, "icon")
    }

    pub fn id(&self) -> String {
        self.wrapper.child_text(ATOM1_NAMESPACE, "id")
    }

    pub fn links(&self) -> Vec<Link> {
        wrap_all(self.wrapper.children(ATOM1_NAMESPACE, "link"))
    }

    pub fn logo(&self) -> String {
        self.wrapper.child_text(ATOM1_NAMESPACE, "logo")
    }

    pub fn rights(&self) -> String {
        extract_atom_text(&self.wrapper, "rights")
    }

    pub fn subtitle(&self) -> String {
        extract_atom_text(&self.wrapper, "subtitle")
    }

    pub fn title(&self) -> String {
        extract_atom_text(&self.wrapper, "title")
    }

    pub fn updated(&self) -> i64 {
        parse_date(&self.wrapper.child_text(ATOM1_NAMESPACE, "updated"), DateFormat::Iso8601)
    }
}
