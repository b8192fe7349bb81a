use super::document::ResourceWrapper;
use super::elements::DublinCore;
use super::node::Resource;
use super::vocab::{content, rss};
use crate::util::normalize_with;

/// An RSS 1.0 item.
///
/// Items obtained from [`super::Document::items`] carry the feed-wide markup
/// flags used to normalize their title and description. Without them the
/// raw values are returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    wrapper: ResourceWrapper,
    title_markup: Option<bool>,
    description_markup: Option<bool>,
}

impl Item {
    pub fn new(wrapper: ResourceWrapper) -> Self {
        Self {
            wrapper,
            title_markup: None,
            description_markup: None,
        }
    }

    pub(crate) fn with_format_info(mut self, title_markup: bool, description_markup: bool) -> Self {
        self.title_markup = Some(title_markup);
        self.description_markup = Some(description_markup);
        self
    }

    pub fn resource(&self) -> &Resource {
        self.wrapper.resource()
    }

    pub fn is_null(&self) -> bool {
        self.wrapper.is_null()
    }

    pub fn title(&self) -> String {
        let raw = self.original_title();
        match self.title_markup {
            Some(markup) => normalize_with(&raw, false, markup),
            None => raw,
        }
    }

    pub fn description(&self) -> String {
        let raw = self.original_description();
        match self.description_markup {
            Some(markup) => normalize_with(&raw, false, markup),
            None => raw,
        }
    }

    pub fn link(&self) -> String {
        self.wrapper.text(rss::LINK)
    }

    /// `content:encoded`, unmodified.
    pub fn encoded_content(&self) -> String {
        self.wrapper.text(content::ENCODED)
    }

    /// Text of the first statement with `predicate`, for extension modules.
    pub fn property_text(&self, predicate: &str) -> String {
        self.wrapper.text(predicate)
    }

    pub fn dc(&self) -> DublinCore {
        DublinCore::new(self.wrapper.clone())
    }

    pub fn original_title(&self) -> String {
        self.wrapper.text(rss::TITLE)
    }

    pub fn original_description(&self) -> String {
        self.wrapper.text(rss::DESCRIPTION)
    }
}
