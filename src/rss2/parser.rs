use super::Document;
use crate::feed::{FeedParser, SpecificDocument};
use crate::rdf::DEFAULT_MARKUP_SAMPLE_SIZE;
use crate::source::DocumentSource;

/// Parser for RSS 0.91 to 2.0 documents: anything with an `<rss>` root.
#[derive(Debug, Clone)]
pub struct Rss2Parser {
    markup_sample_size: usize,
}

impl Default for Rss2Parser {
    fn default() -> Self {
        Self::new(DEFAULT_MARKUP_SAMPLE_SIZE)
    }
}

impl Rss2Parser {
    pub fn new(markup_sample_size: usize) -> Self {
        Self { markup_sample_size }
    }

    pub fn parse_document(&self, source: &DocumentSource) -> Document {
        match source.document() {
            Some(doc) => Document::from_xml(doc, self.markup_sample_size),
            None => {
                tracing::debug!(url = %source.url(), "No XML to read an RSS channel from");
                Document::default()
            }
        }
    }
}

impl FeedParser for Rss2Parser {
    fn format(&self) -> &str {
        "rss2"
    }

    fn accept(&self, source: &DocumentSource) -> bool {
        source.document().is_some_and(|doc| doc.root().is("", "rss"))
    }

    fn parse(&self, source: &DocumentSource) -> SpecificDocument {
        SpecificDocument::Rss2(self.parse_document(source))
    }
}
