use crate::atom::AtomParser;
use crate::config::Config;
use crate::error::ErrorCode;
use crate::rdf::RdfParser;
use crate::rss2::Rss2Parser;
use crate::source::DocumentSource;

use super::mapper::{AtomMapper, RdfMapper, Rss2Mapper};
use super::{Feed, SpecificDocument};

// ============================================================================
// Traits
// ============================================================================

/// A format parser: recognizes a source and builds its specific document.
pub trait FeedParser: Send + Sync {
    /// Unique format name, e.g. `"rss2"`.
    fn format(&self) -> &str;

    /// Cheap check whether this parser understands `source`.
    fn accept(&self, source: &DocumentSource) -> bool;

    /// Parses an accepted source. The result may be invalid if the source
    /// lacks the elements the format requires.
    fn parse(&self, source: &DocumentSource) -> SpecificDocument;
}

/// Turns a specific document into the caller's model type.
pub trait Mapper<T>: Send + Sync {
    /// `None` when the document is of a kind this mapper does not handle.
    fn map(&self, doc: SpecificDocument) -> Option<T>;
}

// ============================================================================
// Collection
// ============================================================================

struct Registration<T> {
    parser: Box<dyn FeedParser>,
    mapper: Box<dyn Mapper<T>>,
}

/// Registry of parsers, each paired with a mapper into `T`.
///
/// [`ParserCollection::parse`] first tries the parser named by the format
/// hint, then every parser in registration order; the first one that
/// accepts the source decides the outcome.
pub struct ParserCollection<T = Feed> {
    registrations: Vec<Registration<T>>,
    last_error: ErrorCode,
}

impl<T> ParserCollection<T> {
    /// An empty collection.
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            last_error: ErrorCode::Success,
        }
    }

    /// Registers a parser and the mapper for its documents.
    ///
    /// Returns `false` and leaves the collection unchanged when a parser for
    /// the same format is already registered.
    pub fn register_parser(&mut self, parser: Box<dyn FeedParser>, mapper: Box<dyn Mapper<T>>) -> bool {
        if self.position(parser.format()).is_some() {
            tracing::warn!(format = parser.format(), "Parser already registered, ignoring");
            return false;
        }
        tracing::debug!(format = parser.format(), "Registered parser");
        self.registrations.push(Registration { parser, mapper });
        true
    }

    /// Replaces the mapper used for `format`. Unknown formats are ignored.
    pub fn change_mapper(&mut self, format: &str, mapper: Box<dyn Mapper<T>>) {
        match self.position(format) {
            Some(idx) => self.registrations[idx].mapper = mapper,
            None => tracing::warn!(format, "No parser registered for format, mapper not changed"),
        }
    }

    /// Registered format names in probing order.
    pub fn formats(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.parser.format()).collect()
    }

    /// Outcome of the most recent [`ParserCollection::parse`] call.
    pub fn last_error(&self) -> ErrorCode {
        self.last_error
    }

    fn position(&self, format: &str) -> Option<usize> {
        self.registrations.iter().position(|r| r.parser.format() == format)
    }

    /// Parses and maps with the registration at `idx`, recording the outcome.
    fn parse_with(&mut self, idx: usize, source: &DocumentSource) -> Option<T> {
        let reg = &self.registrations[idx];
        let doc = reg.parser.parse(source);
        if !doc.is_valid() {
            tracing::debug!(format = reg.parser.format(), url = %source.url(), "Parser produced an invalid document");
            self.last_error = ErrorCode::InvalidFormat;
            return None;
        }
        tracing::debug!(format = reg.parser.format(), url = %source.url(), "Parsed document");
        reg.mapper.map(doc)
    }

    /// Parses `source` into `T`.
    ///
    /// `hint` names the format to try first. On failure `None` is returned and
    /// [`ParserCollection::last_error`] tells why:
    ///
    /// - [`ErrorCode::InvalidFormat`]: a parser accepted the source but the
    ///   resulting document was invalid
    /// - [`ErrorCode::InvalidXml`]: nothing accepted it and it could not be
    ///   read as XML, either malformed or over the reader limits
    ///   ([`DocumentSource::xml_error`] has the detail)
    /// - [`ErrorCode::XmlNotAccepted`]: well-formed XML no parser recognizes
    pub fn parse(&mut self, source: &DocumentSource, hint: Option<&str>) -> Option<T> {
        self.last_error = ErrorCode::Success;

        if let Some(idx) = hint.and_then(|h| self.position(h)) {
            if self.registrations[idx].parser.accept(source) {
                return self.parse_with(idx, source);
            }
        }

        for idx in 0..self.registrations.len() {
            if self.registrations[idx].parser.accept(source) {
                return self.parse_with(idx, source);
            }
        }

        // Sources over the configured limits have no tree either and share
        // InvalidXml; the reader's reason stays on the source.
        match source.xml_error() {
            Some(reason) => {
                self.last_error = ErrorCode::InvalidXml;
                tracing::debug!(url = %source.url(), error = %self.last_error, %reason, "No parser accepted the source");
            }
            None => {
                self.last_error = ErrorCode::XmlNotAccepted;
                tracing::debug!(url = %source.url(), error = %self.last_error, "No parser accepted the source");
            }
        }
        None
    }
}

/// The built-in parsers in the default order: `rss2`, `atom`, `rdf`.
impl Default for ParserCollection<Feed> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ParserCollection<Feed> {
    /// A collection with the built-in parsers registered in
    /// `config.format_order`. Unknown format names are skipped.
    pub fn from_config(config: &Config) -> Self {
        let mut collection = Self::new();
        let sample = config.markup_sample_size;
        for name in &config.format_order {
            match name.as_str() {
                "rss2" => collection.register_parser(Box::new(Rss2Parser::new(sample)), Box::new(Rss2Mapper)),
                "atom" => collection.register_parser(Box::new(AtomParser), Box::new(AtomMapper)),
                "rdf" => collection.register_parser(Box::new(RdfParser::new(sample)), Box::new(RdfMapper)),
                other => {
                    tracing::warn!(format = other, "Unknown feed format in configuration, skipping");
                    false
                }
            };
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rss2;

    /// Records each call into a shared log; always yields an invalid document.
    struct Spy {
        name: &'static str,
        accepts: bool,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl FeedParser for Spy {
        fn format(&self) -> &str {
            self.name
        }

        fn accept(&self, _source: &DocumentSource) -> bool {
            self.log.lock().unwrap().push(format!("accept:{}", self.name));
            self.accepts
        }

        fn parse(&self, _source: &DocumentSource) -> SpecificDocument {
            self.log.lock().unwrap().push(format!("parse:{}", self.name));
            SpecificDocument::Rss2(rss2::Document::default())
        }
    }

    struct Name(&'static str);

    impl Mapper<String> for Name {
        fn map(&self, _doc: SpecificDocument) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn spy(name: &'static str, accepts: bool, log: &Arc<Mutex<Vec<String>>>) -> Box<Spy> {
        Box::new(Spy {
            name,
            accepts,
            log: Arc::clone(log),
        })
    }

    #[test]
    fn test_duplicate_format_is_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut c: ParserCollection<String> = ParserCollection::new();
        assert!(c.register_parser(spy("a", true, &log), Box::new(Name("a"))));
        assert!(!c.register_parser(spy("a", true, &log), Box::new(Name("b"))));
        assert_eq!(c.formats(), vec!["a"]);
    }

    #[test]
    fn test_hint_is_tried_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut c: ParserCollection<String> = ParserCollection::new();
        c.register_parser(spy("a", false, &log), Box::new(Name("a")));
        c.register_parser(spy("b", false, &log), Box::new(Name("b")));
        c.register_parser(spy("c", true, &log), Box::new(Name("c")));

        let source = DocumentSource::new("<x/>", "");
        assert_eq!(c.parse(&source, Some("b")), None);
        assert_eq!(c.last_error(), ErrorCode::InvalidFormat);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["accept:b", "accept:a", "accept:b", "accept:c", "parse:c"]
        );
    }

    #[test]
    fn test_unknown_hint_falls_back_to_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut c: ParserCollection<String> = ParserCollection::new();
        c.register_parser(spy("a", true, &log), Box::new(Name("a")));
        c.register_parser(spy("b", true, &log), Box::new(Name("b")));

        let _ = c.parse(&DocumentSource::new("<x/>", ""), Some("zzz"));
        assert_eq!(*log.lock().unwrap(), vec!["accept:a", "parse:a"]);
    }

    #[test]
    fn test_change_mapper() {
        let mut c = ParserCollection::<String>::new();
        c.register_parser(Box::new(Rss2Parser::default()), Box::new(Name("old")));
        c.change_mapper("rss2", Box::new(Name("new")));
        let source = DocumentSource::new("<rss><channel/></rss>", "");
        assert_eq!(c.parse(&source, None).as_deref(), Some("new"));
        assert_eq!(c.last_error(), ErrorCode::Success);
    }

    #[test]
    fn test_error_codes() {
        let mut c: ParserCollection = ParserCollection::default();
        assert!(c.parse(&DocumentSource::new("<rss", ""), None).is_none());
        assert_eq!(c.last_error(), ErrorCode::InvalidXml);

        assert!(c.parse(&DocumentSource::new("<html/>", ""), None).is_none());
        assert_eq!(c.last_error(), ErrorCode::XmlNotAccepted);

        assert!(c.parse(&DocumentSource::new("<rss/>", ""), None).is_none());
        assert_eq!(c.last_error(), ErrorCode::InvalidFormat);

        assert!(c.parse(&DocumentSource::new("<rss><channel/></rss>", ""), None).is_some());
        assert_eq!(c.last_error(), ErrorCode::Success);
    }

    #[test]
    fn test_source_over_limits_keeps_its_reason() {
        use crate::error::XmlError;
        use crate::xml::XmlLimits;

        let limits = XmlLimits {
            max_nesting_depth: 2,
            ..XmlLimits::default()
        };
        let source = DocumentSource::with_limits("<rss><channel><title/></channel></rss>", "", limits);
        let mut c: ParserCollection = ParserCollection::default();
        assert!(c.parse(&source, None).is_none());
        assert_eq!(c.last_error(), ErrorCode::InvalidXml);
        assert!(matches!(source.xml_error(), Some(XmlError::MaxDepthExceeded(2))));
    }

    #[test]
    fn test_from_config_order_and_unknown_names() {
        let config = Config {
            format_order: vec!["atom".into(), "gopher".into(), "rdf".into(), "atom".into()],
            ..Config::default()
        };
        let c: ParserCollection = ParserCollection::from_config(&config);
        assert_eq!(c.formats(), vec!["atom", "rdf"]);
        let default: ParserCollection = ParserCollection::default();
        assert_eq!(default.formats(), vec!["rss2", "atom", "rdf"]);
    }
}
