//! RSS 0.91, 0.92 and 2.0 support.
//!
//! All RSS versions without RDF are read with the same element views: a
//! [`Document`] wraps the `<channel>`, and its [`Item`]s share the
//! feed-wide [`FormatInfo`] used to turn titles and descriptions into HTML.

mod document;
mod elements;
mod item;
mod parser;

pub use document::Document;
pub use elements::{Category, Cloud, Enclosure, Image, Source, TextInput};
pub use item::{FormatInfo, Item};
pub use parser::Rss2Parser;
