//! Atom 1.0 support (with Atom 0.3 documents up-converted on the fly).
//!
//! The types here are read-only views over the XML tree: nothing is copied
//! out of the document until an accessor is called. A view over a missing
//! element is "null" and returns empty values.

mod content;
mod document;
mod elements;
mod entry;
mod parser;

pub use content::Content;
pub use document::{EntryDocument, FeedDocument};
pub use elements::{Category, Generator, Link, Person, Source};
pub use entry::Entry;
pub use parser::AtomParser;

use crate::util::{escape_special_characters, resolve_entities};
use crate::xml::ElementWrapper;

/// Atom 1.0 namespace.
pub const ATOM1_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Atom 0.3 namespace.
pub const ATOM03_NAMESPACE: &str = "http://purl.org/atom/ns#";

/// Reads an Atom text construct (`title`, `subtitle`, `summary`, `rights`)
/// as HTML, according to its `type` attribute.
pub(crate) fn extract_atom_text(parent: &ElementWrapper, local_name: &str) -> String {
    let el = parent.first_child(ATOM1_NAMESPACE, local_name);
    let is_cdata = el.element().is_some_and(|e| e.first_child_is_cdata());

    match el.attribute_or("type", "text").as_str() {
        "text" => {
            let text = parent.child_text(ATOM1_NAMESPACE, local_name);
            if is_cdata {
                escape_special_characters(&resolve_entities(&text))
            } else {
                escape_special_characters(&text)
            }
        }
        "html" => parent.child_text(ATOM1_NAMESPACE, local_name),
        "xhtml" => el.child_nodes_as_xml(),
        _ => String::new(),
    }
}
