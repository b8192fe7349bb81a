//! Per-format rules that turn a [`SpecificDocument`] into a [`Feed`].
//!
//! Each mapper is eager: the whole unified feed is built in one pass and no
//! longer refers back to the mapper. The format-specific document stays
//! reachable through [`Feed::specific`] and [`Item::specific`].

use super::collection::Mapper;
use super::{
    additional_properties, AdditionalProperties, Category, Enclosure, Feed, Image, Item, Person,
    SpecificDocument, SpecificItem,
};
use crate::atom::{self, ATOM1_NAMESPACE};
use crate::namespaces::{COMMENT_API, ITUNES, SLASH};
use crate::rdf;
use crate::rss2;
use crate::util::{parse_date, person_from_string, synthesize_id, DateFormat};
use crate::xml::ElementWrapper;

/// `slash:comments` as a number, `-1` when missing or not an integer.
fn comments_count(text: &str) -> i32 {
    text.trim().parse().unwrap_or(-1)
}

/// Parses `itunes:duration` in `h:m:s`, `m:s` or `s` form.
///
/// Negative components count as zero; anything unparseable yields `0`.
pub(crate) fn parse_duration(s: &str) -> u32 {
    let s = s.trim();
    if s.is_empty() {
        return 0;
    }
    let mut parts = Vec::with_capacity(3);
    for token in s.split(':') {
        match token.trim().parse::<i64>() {
            Ok(n) => parts.push(u32::try_from(n.max(0)).unwrap_or(u32::MAX)),
            Err(_) => return 0,
        }
    }
    let total = match parts.as_slice() {
        [h, m, s] => u64::from(*h) * 3600 + u64::from(*m) * 60 + u64::from(*s),
        [m, s] => u64::from(*m) * 60 + u64::from(*s),
        [s] => u64::from(*s),
        _ => 0,
    };
    u32::try_from(total).unwrap_or(u32::MAX)
}

fn image_from_url(url: String) -> Option<Image> {
    (!url.is_empty()).then(|| Image {
        url,
        ..Image::default()
    })
}

// ============================================================================
// Atom
// ============================================================================

/// Maps Atom feed and entry documents. An entry document becomes a feed
/// with a single item and no feed-level metadata besides the entry's.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomMapper;

fn atom_person(p: &atom::Person) -> Person {
    Person::new(p.name(), p.uri(), p.email())
}

fn atom_people(authors: Vec<atom::Person>, contributors: Vec<atom::Person>) -> Vec<Person> {
    authors
        .iter()
        .chain(contributors.iter())
        .map(atom_person)
        .filter(|p| !p.is_null())
        .collect()
}

fn atom_category(c: &atom::Category) -> Category {
    Category {
        term: c.term(),
        scheme: c.scheme(),
        label: c.label(),
    }
}

fn alternate_link(links: &[atom::Link]) -> String {
    links
        .iter()
        .find(|l| l.rel() == "alternate")
        .map(atom::Link::href)
        .unwrap_or_default()
}

fn map_entry(entry: atom::Entry) -> Item {
    let links = entry.links();
    let title = entry.title();
    let description = entry.summary();
    let link = alternate_link(&links);
    let content = {
        let c = entry.content();
        if c.is_null() {
            String::new()
        } else {
            c.as_string()
        }
    };

    let id = match entry.id() {
        id if !id.is_empty() => id,
        _ => synthesize_id(&title, &description, &link, &content),
    };

    let (published, updated) = (entry.published(), entry.updated());
    let date_published = if published != 0 { published } else { updated };
    let date_updated = if updated != 0 { updated } else { published };

    let enclosures = links
        .iter()
        .filter(|l| l.rel() == "enclosure")
        .map(|l| Enclosure {
            url: l.href(),
            title: l.title(),
            mime_type: l.mime_type(),
            length: l.length(),
            duration: 0,
        })
        .collect();

    let el = entry.wrapper();
    Item {
        authors: atom_people(entry.authors(), entry.contributors()),
        categories: entry.categories().iter().map(atom_category).collect(),
        language: entry.language(),
        comments_count: comments_count(&el.child_text(SLASH, "comments")),
        comments_link: String::new(),
        comments_feed: el.child_text(COMMENT_API, "commentRss"),
        comment_post_uri: el.child_text(COMMENT_API, "comment"),
        additional_properties: additional_properties(entry.unhandled_elements()),
        title,
        link,
        description,
        content,
        date_published,
        date_updated,
        id,
        enclosures,
        specific: SpecificItem::Atom(entry),
    }
}

fn map_atom_feed(doc: atom::FeedDocument) -> Feed {
    let items = doc.entries().into_iter().map(map_entry).collect();
    Feed {
        title: doc.title(),
        link: alternate_link(&doc.links()),
        description: doc.subtitle(),
        items,
        categories: doc.categories().iter().map(atom_category).collect(),
        authors: atom_people(doc.authors(), doc.contributors()),
        language: doc.language(),
        copyright: doc.rights(),
        image: image_from_url(doc.logo()),
        icon: image_from_url(doc.icon()),
        additional_properties: additional_properties(doc.unhandled_elements()),
        specific: SpecificDocument::AtomFeed(doc),
    }
}

fn map_atom_entry(doc: atom::EntryDocument) -> Feed {
    let item = map_entry(doc.entry());
    Feed {
        title: String::new(),
        link: String::new(),
        description: String::new(),
        categories: Vec::new(),
        authors: Vec::new(),
        language: item.language.clone(),
        copyright: String::new(),
        image: None,
        icon: None,
        additional_properties: AdditionalProperties::new(),
        items: vec![item],
        specific: SpecificDocument::AtomEntry(doc),
    }
}

impl Mapper<Feed> for AtomMapper {
    fn map(&self, doc: SpecificDocument) -> Option<Feed> {
        match doc {
            SpecificDocument::AtomFeed(doc) => Some(map_atom_feed(doc)),
            SpecificDocument::AtomEntry(doc) => Some(map_atom_entry(doc)),
            other => {
                tracing::debug!(document = other.format(), "Atom mapper received a foreign document");
                None
            }
        }
    }
}

// ============================================================================
// RSS 2
// ============================================================================

/// Maps RSS 0.9x / 2.0 channels.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rss2Mapper;

fn map_rss2_item(item: rss2::Item) -> Item {
    let el: &ElementWrapper = item.wrapper();

    let title = item.title();
    let description = item.description();
    let content = item.content();
    let link = match item.link() {
        link if !link.is_empty() => link,
        _ if item.guid_is_perma_link() => item.guid(),
        _ => String::new(),
    };
    let id = match item.guid() {
        guid if !guid.is_empty() => guid,
        _ => synthesize_id(&title, &description, &link, &content),
    };

    let date_published = item.pub_date();
    let date_updated = match el.child_text_opt(ATOM1_NAMESPACE, "updated") {
        Some(updated) if !updated.is_empty() => parse_date(&updated, DateFormat::Iso8601),
        _ => date_published,
    };

    let duration = parse_duration(&el.child_text(ITUNES, "duration"));
    let enclosures = item
        .enclosures()
        .iter()
        .map(|e| Enclosure {
            url: e.url(),
            title: String::new(),
            mime_type: e.mime_type(),
            length: e.length(),
            duration,
        })
        .collect();

    let author = person_from_string(&item.author());
    let comments_feed = el
        .child_text_opt(COMMENT_API, "commentRss")
        .unwrap_or_else(|| el.child_text(COMMENT_API, "commentRSS"));

    Item {
        authors: if author.is_null() { Vec::new() } else { vec![author] },
        categories: item
            .categories()
            .iter()
            .map(|c| Category {
                term: c.category(),
                scheme: c.domain(),
                label: String::new(),
            })
            .collect(),
        language: String::new(),
        comments_count: comments_count(&el.child_text(SLASH, "comments")),
        comments_link: item.comments(),
        comments_feed,
        comment_post_uri: el.child_text(COMMENT_API, "comment"),
        additional_properties: additional_properties(item.unhandled_elements()),
        title,
        link,
        description,
        content,
        date_published,
        date_updated,
        id,
        enclosures,
        specific: SpecificItem::Rss2(item),
    }
}

fn map_rss2(doc: rss2::Document) -> Feed {
    let image = doc.image();
    let image = (!image.is_null() && !image.url().is_empty()).then(|| Image {
        url: image.url(),
        title: image.title(),
        link: image.link(),
        description: image.description(),
        width: image.width(),
        height: image.height(),
    });

    Feed {
        title: doc.title(),
        link: doc.link(),
        description: doc.description(),
        items: doc.items().into_iter().map(map_rss2_item).collect(),
        categories: doc
            .categories()
            .iter()
            .map(|c| Category {
                term: c.category(),
                scheme: c.domain(),
                label: String::new(),
            })
            .collect(),
        authors: Vec::new(),
        language: doc.language(),
        copyright: doc.copyright(),
        image,
        icon: None,
        additional_properties: additional_properties(doc.unhandled_elements()),
        specific: SpecificDocument::Rss2(doc),
    }
}

impl Mapper<Feed> for Rss2Mapper {
    fn map(&self, doc: SpecificDocument) -> Option<Feed> {
        match doc {
            SpecificDocument::Rss2(doc) => Some(map_rss2(doc)),
            other => {
                tracing::debug!(document = other.format(), "RSS 2 mapper received a foreign document");
                None
            }
        }
    }
}

// ============================================================================
// RDF
// ============================================================================

/// Maps RSS 1.0 (and normalized RSS 0.9) documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct RdfMapper;

fn dc_people(dc: &rdf::DublinCore) -> Vec<Person> {
    dc.creators()
        .iter()
        .chain(dc.contributors().iter())
        .map(|s| person_from_string(s))
        .filter(|p| !p.is_null())
        .collect()
}

fn map_rdf_item(item: rdf::Item) -> Item {
    let dc = item.dc();
    let title = item.title();
    let description = item.description();
    let link = item.link();
    let content = item.encoded_content();
    let id = if item.resource().is_anon() {
        synthesize_id(&title, &description, &link, &content)
    } else {
        item.resource().uri().to_string()
    };
    let date = dc.date();

    Item {
        authors: dc_people(&dc),
        categories: Vec::new(),
        language: dc.language(),
        enclosures: Vec::new(),
        comments_count: comments_count(&item.property_text(&format!("{SLASH}comments"))),
        comments_link: String::new(),
        comments_feed: item.property_text(&format!("{COMMENT_API}commentRss")),
        comment_post_uri: item.property_text(&format!("{COMMENT_API}comment")),
        additional_properties: AdditionalProperties::new(),
        title,
        link,
        description,
        content,
        date_published: date,
        date_updated: date,
        id,
        specific: SpecificItem::Rdf(item),
    }
}

fn map_rdf(doc: rdf::Document) -> Feed {
    let dc = doc.dc();
    let image = doc.image();
    let image = (!image.is_null() && !image.url().is_empty()).then(|| Image {
        url: image.url(),
        title: image.title(),
        link: image.link(),
        ..Image::default()
    });

    Feed {
        title: doc.title(),
        link: doc.link(),
        description: doc.description(),
        items: doc.items().into_iter().map(map_rdf_item).collect(),
        categories: Vec::new(),
        authors: dc_people(&dc),
        language: dc.language(),
        copyright: dc.rights(),
        image,
        icon: None,
        additional_properties: AdditionalProperties::new(),
        specific: SpecificDocument::Rdf(doc),
    }
}

impl Mapper<Feed> for RdfMapper {
    fn map(&self, doc: SpecificDocument) -> Option<Feed> {
        match doc {
            SpecificDocument::Rdf(doc) => Some(map_rdf(doc)),
            other => {
                tracing::debug!(document = other.format(), "RDF mapper received a foreign document");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::atom::AtomParser;
    use crate::rdf::RdfParser;
    use crate::rss2::Rss2Parser;
    use crate::source::DocumentSource;

    fn source(xml: &str) -> DocumentSource {
        DocumentSource::new(xml, "http://example.com/feed")
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("1:02:03"), 3723);
        assert_eq!(parse_duration("02:03"), 123);
        assert_eq!(parse_duration("45"), 45);
        assert_eq!(parse_duration("-5:10"), 10);
        assert_eq!(parse_duration("1:x"), 0);
        assert_eq!(parse_duration("1:2:3:4"), 0);
        assert_eq!(parse_duration(""), 0);
    }

    #[test]
    fn test_comments_count() {
        assert_eq!(comments_count(" 12 "), 12);
        assert_eq!(comments_count(""), -1);
        assert_eq!(comments_count("many"), -1);
    }

    #[test]
    fn test_atom_feed_mapping() {
        let doc = AtomParser.parse_document(&source(
            r#"<feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en"
                     xmlns:slash="http://purl.org/rss/1.0/modules/slash/">
                 <title>Example</title>
                 <subtitle>All the news</subtitle>
                 <link rel="self" href="http://example.com/feed"/>
                 <link href="http://example.com/"/>
                 <logo>http://example.com/logo.png</logo>
                 <author><name>Jane</name></author>
                 <contributor><name>Joe</name></contributor>
                 <entry>
                   <title>First</title>
                   <updated>2005-07-31T12:29:29Z</updated>
                   <link href="http://example.com/1"/>
                   <link rel="enclosure" href="http://example.com/1.mp3" type="audio/mpeg" length="99"/>
                   <slash:comments>4</slash:comments>
                 </entry>
               </feed>"#,
        ));
        let feed = AtomMapper.map(doc).unwrap();
        assert_eq!(feed.title, "Example");
        assert_eq!(feed.description, "All the news");
        assert_eq!(feed.link, "http://example.com/");
        assert_eq!(feed.language, "en");
        assert_eq!(feed.image.as_ref().map(|i| i.url.as_str()), Some("http://example.com/logo.png"));
        assert!(feed.icon.is_none());
        let names: Vec<_> = feed.authors.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jane", "Joe"]);

        let item = &feed.items[0];
        assert_eq!(item.date_published, 1_122_812_969);
        assert_eq!(item.date_updated, 1_122_812_969);
        assert_eq!(item.comments_count, 4);
        assert!(item.id.starts_with("hash:"));
        assert_eq!(item.enclosures[0].length, 99);
        assert_eq!(item.enclosures[0].mime_type, "audio/mpeg");
        assert_eq!(item.authors[0].name, "Jane");
    }

    #[test]
    fn test_atom_entry_document_is_single_item_feed() {
        let doc = AtomParser.parse_document(&source(
            r#"<entry xmlns="http://www.w3.org/2005/Atom"><id>urn:x:1</id><title>Lone</title></entry>"#,
        ));
        let feed = AtomMapper.map(doc).unwrap();
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].id, "urn:x:1");
        assert!(matches!(feed.specific, SpecificDocument::AtomEntry(_)));
    }

    #[test]
    fn test_rss2_item_mapping() {
        let doc = Rss2Parser::default().parse_document(&source(
            r#"<rss version="2.0"
                    xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd"
                    xmlns:wfw="http://wellformedweb.org/CommentAPI/"
                    xmlns:atom="http://www.w3.org/2005/Atom">
                 <channel>
                   <title>Podcast</title>
                   <link>http://example.com/</link>
                   <image><url>http://example.com/i.png</url></image>
                   <item>
                     <guid>http://example.com/ep1</guid>
                     <author>host@example.com (The Host)</author>
                     <pubDate>Tue, 10 Jun 2003 04:00:00 GMT</pubDate>
                     <atom:updated>2005-07-31T12:29:29Z</atom:updated>
                     <enclosure url="http://example.com/ep1.mp3" length="10" type="audio/mpeg"/>
                     <itunes:duration>1:00</itunes:duration>
                     <comments>http://example.com/ep1#c</comments>
                     <wfw:commentRSS>http://example.com/ep1/rss</wfw:commentRSS>
                   </item>
                 </channel>
               </rss>"#,
        ));
        let feed = Rss2Mapper.map(SpecificDocument::Rss2(doc)).unwrap();
        let image = feed.image.unwrap();
        assert_eq!(image.width, 88);
        assert!(feed.authors.is_empty());

        let item = &feed.items[0];
        assert_eq!(item.link, "http://example.com/ep1");
        assert_eq!(item.id, "http://example.com/ep1");
        assert_eq!(item.authors, vec![Person::new("The Host", "", "host@example.com")]);
        assert_eq!(item.date_published, 1_055_217_600);
        assert_eq!(item.date_updated, 1_122_812_969);
        assert_eq!(item.enclosures[0].duration, 60);
        assert_eq!(item.comments_link, "http://example.com/ep1#c");
        assert_eq!(item.comments_feed, "http://example.com/ep1/rss");
        assert_eq!(item.comments_count, -1);
    }

    #[test]
    fn test_rdf_mapping() {
        let doc = RdfParser::default().parse_document(&source(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                        xmlns="http://purl.org/rss/1.0/"
                        xmlns:dc="http://purl.org/dc/elements/1.1/"
                        xmlns:slash="http://purl.org/rss/1.0/modules/slash/">
                 <channel rdf:about="http://example.com/">
                   <title>RDF Site</title>
                   <dc:creator>Jane Doe &lt;jane@example.com&gt;</dc:creator>
                   <dc:rights>CC</dc:rights>
                 </channel>
                 <item rdf:about="http://example.com/a">
                   <title>A</title>
                   <dc:date>2004-01-02T03:04:05Z</dc:date>
                   <slash:comments>7</slash:comments>
                 </item>
               </rdf:RDF>"#,
        ));
        let feed = RdfMapper.map(SpecificDocument::Rdf(doc)).unwrap();
        assert_eq!(feed.title, "RDF Site");
        assert_eq!(feed.copyright, "CC");
        assert_eq!(feed.authors[0].email, "jane@example.com");
        let item = &feed.items[0];
        assert_eq!(item.id, "http://example.com/a");
        assert_eq!(item.comments_count, 7);
        assert_ne!(item.date_published, 0);
        assert_eq!(item.date_published, item.date_updated);
    }

    #[test]
    fn test_mismatched_document_is_rejected() {
        let doc = Rss2Parser::default().parse_document(&source("<rss><channel/></rss>"));
        let doc = SpecificDocument::Rss2(doc);
        assert!(AtomMapper.map(doc.clone()).is_none());
        assert!(RdfMapper.map(doc).is_none());
    }
}
