//! Parses Atom, RSS 0.9x/2.0 and RSS 0.9/1.0 (RDF) documents into one
//! format-agnostic [`Feed`].
//!
//! Each format has its own module exposing the document as the format sees
//! it ([`atom`], [`rss2`], [`rdf`]). A [`ParserCollection`] picks the right
//! parser for a [`DocumentSource`] and maps the result into the unified
//! model of [`feed`].
//!
//! ```
//! use syndication::DocumentSource;
//!
//! let source = DocumentSource::new(
//!     r#"<feed xmlns="http://www.w3.org/2005/Atom">
//!          <title>Example</title>
//!          <entry><id>urn:1</id><title>Hello</title></entry>
//!        </feed>"#,
//!     "http://example.com/atom.xml",
//! );
//! let feed = syndication::parse(&source, None).unwrap();
//! assert_eq!(feed.items[0].title, "Hello");
//! ```

pub mod atom;
pub mod config;
pub mod error;
pub mod feed;
pub mod namespaces;
pub mod rdf;
pub mod rss2;
pub mod source;
pub mod util;
pub mod xml;

pub use config::Config;
pub use error::{ConfigError, ErrorCode, XmlError};
pub use feed::{
    Category, Enclosure, Feed, FeedParser, Image, Item, Mapper, ParserCollection, Person,
    SpecificDocument, SpecificItem,
};
pub use source::DocumentSource;

/// Parses `source` with the built-in parsers.
///
/// `hint` names the format to try first (`"rss2"`, `"atom"` or `"rdf"`).
/// Use a [`ParserCollection`] directly to reuse it across documents or to
/// register custom parsers.
pub fn parse(source: &DocumentSource, hint: Option<&str>) -> Result<Feed, ErrorCode> {
    let mut collection: ParserCollection = ParserCollection::default();
    match collection.parse(source, hint) {
        Some(feed) => Ok(feed),
        None => Err(match collection.last_error() {
            // A mapper declined a document its own parser produced.
            ErrorCode::Success => ErrorCode::InvalidFormat,
            code => code,
        }),
    }
}
