use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, OnceLock};

use chrono::Weekday;

use super::item::FormatInfo;
use super::{Category, Cloud, Image, Item, TextInput};
use crate::namespaces::DUBLIN_CORE;
use crate::rdf::DEFAULT_MARKUP_SAMPLE_SIZE;
use crate::util::{normalize, parse_date, string_contains_markup, DateFormat};
use crate::xml::{Element, ElementWrapper, XmlDocument};

const HANDLED: [(&str, &str); 22] = [
    ("", "title"),
    ("", "link"),
    ("", "description"),
    ("", "language"),
    ("", "copyright"),
    ("", "managingEditor"),
    ("", "webMaster"),
    ("", "pubDate"),
    ("", "lastBuildDate"),
    ("", "skipDays"),
    ("", "skipHours"),
    ("", "item"),
    ("", "textinput"),
    ("", "textInput"),
    ("", "image"),
    ("", "ttl"),
    ("", "generator"),
    ("", "docs"),
    ("", "cloud"),
    (DUBLIN_CORE, "language"),
    (DUBLIN_CORE, "rights"),
    (DUBLIN_CORE, "date"),
];

/// An RSS 0.9x / 2.0 `<channel>`.
#[derive(Debug, Clone, Default)]
pub struct Document {
    wrapper: ElementWrapper,
    sample_size: usize,
    title_info: OnceLock<FormatInfo>,
    description_info: OnceLock<FormatInfo>,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.wrapper == other.wrapper
    }
}

impl Document {
    /// Wraps the `<channel>` of an `<rss>` document. The result is invalid
    /// when the root is not `<rss>` or has no channel.
    pub fn from_xml(doc: &XmlDocument, sample_size: usize) -> Self {
        let root = doc.root();
        let channel = if root.is("", "rss") {
            root.first_child_ns("", "channel").cloned()
        } else {
            None
        };
        Self {
            wrapper: channel.into(),
            sample_size,
            ..Self::default()
        }
    }

    pub fn new(channel: Arc<Element>) -> Self {
        Self {
            wrapper: ElementWrapper::new(channel),
            sample_size: DEFAULT_MARKUP_SAMPLE_SIZE,
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.wrapper.is_null()
    }

    pub fn title(&self) -> String {
        self.wrapper.child_text("", "title")
    }

    pub fn link(&self) -> String {
        self.wrapper.child_text("", "link")
    }

    pub fn description(&self) -> String {
        normalize(&self.wrapper.child_text("", "description"))
    }

    /// `<language>`, falling back to `dc:language`.
    pub fn language(&self) -> String {
        self.wrapper
            .child_text_opt("", "language")
            .unwrap_or_else(|| self.wrapper.child_text(DUBLIN_CORE, "language"))
    }

    /// `<copyright>`, falling back to `dc:rights`.
    pub fn copyright(&self) -> String {
        self.wrapper
            .child_text_opt("", "copyright")
            .unwrap_or_else(|| self.wrapper.child_text(DUBLIN_CORE, "rights"))
    }

    pub fn managing_editor(&self) -> String {
        self.wrapper.child_text("", "managingEditor")
    }

    pub fn web_master(&self) -> String {
        self.wrapper.child_text("", "webMaster")
    }

    /// `<pubDate>`, falling back to `dc:date`.
    pub fn pub_date(&self) -> i64 {
        match self.wrapper.child_text_opt("", "pubDate") {
            Some(date) => parse_date(&date, DateFormat::Rfc2822),
            None => parse_date(&self.wrapper.child_text(DUBLIN_CORE, "date"), DateFormat::Iso8601),
        }
    }

    pub fn last_build_date(&self) -> i64 {
        parse_date(&self.wrapper.child_text("", "lastBuildDate"), DateFormat::Rfc2822)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.wrapper
            .children("", "category")
            .into_iter()
            .map(|el| ElementWrapper::new(el).into())
            .collect()
    }

    pub fn generator(&self) -> String {
        self.wrapper.child_text("", "generator")
    }

    pub fn docs(&self) -> String {
        self.wrapper.child_text("", "docs")
    }

    pub fn cloud(&self) -> Cloud {
        self.wrapper.first_child("", "cloud").into()
    }

    /// Minutes the channel may be cached, `0` if unspecified.
    pub fn ttl(&self) -> i32 {
        self.wrapper.child_text("", "ttl").parse().unwrap_or(0)
    }

    pub fn image(&self) -> Image {
        self.wrapper.first_child("", "image").into()
    }

    pub fn text_input(&self) -> TextInput {
        let ti = self.wrapper.first_child("", "textInput");
        if !ti.is_null() {
            return ti.into();
        }
        self.wrapper.first_child("", "textinput").into()
    }

    /// Hours (GMT) in which aggregators should not poll.
    pub fn skip_hours(&self) -> BTreeSet<u32> {
        self.wrapper
            .first_child("", "skipHours")
            .children("", "hour")
            .iter()
            .filter_map(|h| h.text().trim().parse().ok())
            .collect()
    }

    /// Days on which aggregators should not poll.
    pub fn skip_days(&self) -> HashSet<Weekday> {
        self.wrapper
            .first_child("", "skipDays")
            .children("", "day")
            .iter()
            .filter_map(|d| match d.text().trim() {
                "Monday" => Some(Weekday::Mon),
                "Tuesday" => Some(Weekday::Tue),
                "Wednesday" => Some(Weekday::Wed),
                "Thursday" => Some(Weekday::Thu),
                "Friday" => Some(Weekday::Fri),
                "Saturday" => Some(Weekday::Sat),
                "Sunday" => Some(Weekday::Sun),
                _ => None,
            })
            .collect()
    }

    fn item_elements(&self) -> Vec<Arc<Element>> {
        self.wrapper.children("", "item")
    }

    fn guess_format(&self, local_name: &str) -> FormatInfo {
        let items = self.item_elements();
        let Some(first) = items.first() else {
            return FormatInfo::default();
        };
        let is_cdata = first
            .first_child_ns("", local_name)
            .is_some_and(|el| el.first_child_is_cdata());
        let sample: String = items
            .iter()
            .take(self.sample_size)
            .filter_map(|item| item.child_text_ns("", local_name))
            .collect();
        FormatInfo {
            is_cdata,
            contains_markup: string_contains_markup(&sample),
        }
    }

    /// Format of item titles, guessed once from the first items.
    pub fn item_title_format_info(&self) -> FormatInfo {
        *self.title_info.get_or_init(|| self.guess_format("title"))
    }

    /// Format of item descriptions, guessed once from the first items.
    pub fn item_description_format_info(&self) -> FormatInfo {
        *self
            .description_info
            .get_or_init(|| self.guess_format("description"))
    }

    pub fn items(&self) -> Vec<Item> {
        let link = self.link();
        let title_info = self.item_title_format_info();
        let description_info = self.item_description_format_info();
        self.item_elements()
            .into_iter()
            .map(|el| Item::in_channel(el, link.clone(), title_info, description_info))
            .collect()
    }

    pub fn unhandled_elements(&self) -> Vec<Arc<Element>> {
        self.wrapper.unhandled_elements(&HANDLED)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:ext="urn:ext">
  <channel>
    <title>Liftoff News</title>
    <link>http://liftoff.msfc.nasa.gov/</link>
    <description>Liftoff to Space Exploration.</description>
    <dc:language>en-us</dc:language>
    <pubDate>Tue, 10 Jun 2003 04:00:00 GMT</pubDate>
    <skipHours><hour>1</hour><hour>x</hour><hour>23</hour></skipHours>
    <skipDays><day>Sunday</day><day>Someday</day></skipDays>
    <ext:mood>happy</ext:mood>
    <item>
      <title>Star City</title>
      <link>news/2003/06/03.html</link>
      <description><![CDATA[How do <i>Americans</i> get ready?]]></description>
    </item>
    <item>
      <title>Sky watchers &amp; friends</title>
      <description>Sky watchers in Europe.</description>
    </item>
  </channel>
</rss>"#;

    fn doc() -> Document {
        Document::from_xml(&XmlDocument::parse_str(RSS).unwrap(), DEFAULT_MARKUP_SAMPLE_SIZE)
    }

    #[test]
    fn test_channel_fields() {
        let doc = doc();
        assert!(doc.is_valid());
        assert_eq!(doc.title(), "Liftoff News");
        assert_eq!(doc.language(), "en-us");
        assert_eq!(doc.pub_date(), 1_055_217_600);
        assert_eq!(doc.ttl(), 0);
        assert!(doc.image().is_null());
        assert_eq!(doc.skip_hours().into_iter().collect::<Vec<_>>(), vec![1, 23]);
        assert_eq!(doc.skip_days(), HashSet::from([Weekday::Sun]));
        let extra = doc.unhandled_elements();
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].local_name(), "mood");
    }

    #[test]
    fn test_item_format_info_is_shared() {
        let doc = doc();
        assert_eq!(
            doc.item_description_format_info(),
            FormatInfo {
                is_cdata: true,
                contains_markup: true
            }
        );
        assert_eq!(doc.item_title_format_info(), FormatInfo::default());

        let items = doc.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].link(), "http://liftoff.msfc.nasa.gov/news/2003/06/03.html");
        assert_eq!(items[0].description(), "How do <i>Americans</i> get ready?");
        assert_eq!(items[1].title(), "Sky watchers &amp; friends");
    }

    #[test]
    fn test_non_rss_root_is_invalid() {
        let doc = Document::from_xml(&XmlDocument::parse_str("<feed/>").unwrap(), 10);
        assert!(!doc.is_valid());
        assert!(doc.items().is_empty());
    }
}
