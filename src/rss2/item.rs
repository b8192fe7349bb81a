use std::sync::Arc;

use super::{Category, Enclosure, Source};
use crate::namespaces::{CONTENT, DUBLIN_CORE, XHTML};
use crate::util::{is_http_url, join_to_channel_link, normalize_with, parse_date, DateFormat};
use crate::xml::{Element, ElementWrapper};

const HANDLED: [(&str, &str); 11] = [
    ("", "title"),
    ("", "link"),
    ("", "description"),
    ("", "pubDate"),
    ("", "expirationDate"),
    ("", "rating"),
    ("", "source"),
    ("", "guid"),
    ("", "comments"),
    ("", "author"),
    (DUBLIN_CORE, "date"),
];

/// How item titles or descriptions of one feed are encoded, guessed once per
/// document from its first items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatInfo {
    /// The first item's element starts with a CDATA section.
    pub is_cdata: bool,
    /// The sampled items contain HTML.
    pub contains_markup: bool,
}

/// An RSS 2 `<item>`.
///
/// Items handed out by [`super::Document::items`] know the channel link and
/// the feed-wide format info; a standalone item returns raw values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    wrapper: ElementWrapper,
    channel_link: String,
    title_info: Option<FormatInfo>,
    description_info: Option<FormatInfo>,
}

impl From<ElementWrapper> for Item {
    fn from(wrapper: ElementWrapper) -> Self {
        Self {
            wrapper,
            ..Self::default()
        }
    }
}

impl Item {
    pub(crate) fn in_channel(
        element: Arc<Element>,
        channel_link: String,
        title_info: FormatInfo,
        description_info: FormatInfo,
    ) -> Self {
        Self {
            wrapper: ElementWrapper::new(element),
            channel_link,
            title_info: Some(title_info),
            description_info: Some(description_info),
        }
    }

    pub fn is_null(&self) -> bool {
        self.wrapper.is_null()
    }

    pub(crate) fn wrapper(&self) -> &ElementWrapper {
        &self.wrapper
    }

    pub fn original_title(&self) -> String {
        self.wrapper.child_text("", "title")
    }

    pub fn original_description(&self) -> String {
        self.wrapper.child_text("", "description")
    }

    pub fn title(&self) -> String {
        let raw = self.original_title();
        match self.title_info {
            Some(info) => normalize_with(&raw, info.is_cdata, info.contains_markup),
            None => raw,
        }
    }

    pub fn description(&self) -> String {
        let raw = self.original_description();
        match self.description_info {
            Some(info) => normalize_with(&raw, info.is_cdata, info.contains_markup),
            None => raw,
        }
    }

    /// The item link. Relative links are appended to the channel link.
    pub fn link(&self) -> String {
        let url = self.wrapper.child_text("", "link");
        if is_http_url(&url) || url.is_empty() || self.channel_link.is_empty() {
            return url;
        }
        join_to_channel_link(&self.channel_link, &url)
    }

    /// Full content from `content:encoded`, else an embedded XHTML `body` or
    /// `div`.
    pub fn content(&self) -> String {
        if let Some(encoded) = self.wrapper.child_text_opt(CONTENT, "encoded") {
            return encoded;
        }
        for local in ["body", "div"] {
            let el = self.wrapper.first_child(XHTML, local);
            if !el.is_null() {
                return el.child_nodes_as_xml();
            }
        }
        String::new()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.wrapper
            .children("", "category")
            .into_iter()
            .map(|el| ElementWrapper::new(el).into())
            .collect()
    }

    /// URL of the item's comments page.
    pub fn comments(&self) -> String {
        self.wrapper.child_text("", "comments")
    }

    /// `<author>`, falling back to `dc:creator`.
    pub fn author(&self) -> String {
        self.wrapper
            .child_text_opt("", "author")
            .unwrap_or_else(|| self.wrapper.child_text(DUBLIN_CORE, "creator"))
    }

    pub fn enclosures(&self) -> Vec<Enclosure> {
        self.wrapper
            .children("", "enclosure")
            .into_iter()
            .map(|el| ElementWrapper::new(el).into())
            .collect()
    }

    pub fn guid(&self) -> String {
        self.wrapper.child_text("", "guid")
    }

    /// Whether the guid is a URL; true unless `isPermaLink="false"`.
    pub fn guid_is_perma_link(&self) -> bool {
        self.wrapper.first_child("", "guid").attribute("isPermaLink") != "false"
    }

    /// `<pubDate>`, falling back to `dc:date`.
    pub fn pub_date(&self) -> i64 {
        match self.wrapper.child_text_opt("", "pubDate") {
            Some(date) => parse_date(&date, DateFormat::Rfc2822),
            None => parse_date(&self.wrapper.child_text(DUBLIN_CORE, "date"), DateFormat::Iso8601),
        }
    }

    pub fn expiration_date(&self) -> i64 {
        parse_date(&self.wrapper.child_text("", "expirationDate"), DateFormat::Rfc2822)
    }

    pub fn source(&self) -> Source {
        self.wrapper.first_child("", "source").into()
    }

    pub fn rating(&self) -> String {
        self.wrapper.child_text("", "rating")
    }

    pub fn unhandled_elements(&self) -> Vec<Arc<Element>> {
        self.wrapper.unhandled_elements(&HANDLED)
    }
}
