use std::fmt;

use super::document::ResourceWrapper;
use super::vocab::{dc, rss, syndication};
use crate::util::{parse_date, DateFormat};

// ============================================================================
// Dublin Core
// ============================================================================

/// Dublin Core metadata attached to a channel or item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DublinCore {
    wrapper: ResourceWrapper,
}

impl DublinCore {
    pub fn new(wrapper: ResourceWrapper) -> Self {
        Self { wrapper }
    }

    pub fn contributor(&self) -> String {
        self.wrapper.text(dc::CONTRIBUTOR)
    }

    pub fn contributors(&self) -> Vec<String> {
        self.wrapper.texts(dc::CONTRIBUTOR)
    }

    pub fn coverage(&self) -> String {
        self.wrapper.text(dc::COVERAGE)
    }

    pub fn creator(&self) -> String {
        self.wrapper.text(dc::CREATOR)
    }

    pub fn creators(&self) -> Vec<String> {
        self.wrapper.texts(dc::CREATOR)
    }

    /// `dc:date` as seconds since the epoch, `0` if absent or unparseable.
    pub fn date(&self) -> i64 {
        parse_date(&self.wrapper.text(dc::DATE), DateFormat::Iso8601)
    }

    pub fn description(&self) -> String {
        self.wrapper.text(dc::DESCRIPTION)
    }

    pub fn format(&self) -> String {
        self.wrapper.text(dc::FORMAT)
    }

    pub fn identifier(&self) -> String {
        self.wrapper.text(dc::IDENTIFIER)
    }

    pub fn language(&self) -> String {
        self.wrapper.text(dc::LANGUAGE)
    }

    pub fn publisher(&self) -> String {
        self.wrapper.text(dc::PUBLISHER)
    }

    pub fn relation(&self) -> String {
        self.wrapper.text(dc::RELATION)
    }

    pub fn rights(&self) -> String {
        self.wrapper.text(dc::RIGHTS)
    }

    pub fn source(&self) -> String {
        self.wrapper.text(dc::SOURCE)
    }

    pub fn subject(&self) -> String {
        self.wrapper.text(dc::SUBJECT)
    }

    pub fn subjects(&self) -> Vec<String> {
        self.wrapper.texts(dc::SUBJECT)
    }

    pub fn title(&self) -> String {
        self.wrapper.text(dc::TITLE)
    }

    pub fn type_(&self) -> String {
        self.wrapper.text(dc::TYPE)
    }
}

// ============================================================================
// Image / TextInput
// ============================================================================

/// The channel image (`rss:image`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    wrapper: ResourceWrapper,
}

impl Image {
    pub fn new(wrapper: ResourceWrapper) -> Self {
        Self { wrapper }
    }

    pub fn is_null(&self) -> bool {
        self.wrapper.is_null()
    }

    pub fn title(&self) -> String {
        self.wrapper.text(rss::TITLE)
    }

    pub fn link(&self) -> String {
        self.wrapper.text(rss::LINK)
    }

    pub fn url(&self) -> String {
        self.wrapper.text(rss::URL)
    }
}

/// A text input box (`rss:textinput`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    wrapper: ResourceWrapper,
}

impl TextInput {
    pub fn new(wrapper: ResourceWrapper) -> Self {
        Self { wrapper }
    }

    pub fn is_null(&self) -> bool {
        self.wrapper.is_null()
    }

    pub fn title(&self) -> String {
        self.wrapper.text(rss::TITLE)
    }

    pub fn description(&self) -> String {
        self.wrapper.text(rss::DESCRIPTION)
    }

    pub fn link(&self) -> String {
        self.wrapper.text(rss::LINK)
    }

    pub fn name(&self) -> String {
        self.wrapper.text(rss::NAME)
    }
}

// ============================================================================
// Syndication module
// ============================================================================

/// `sy:updatePeriod` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UpdatePeriod {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl UpdatePeriod {
    /// Parses a period name; anything unrecognized is [`UpdatePeriod::Daily`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "hourly" => Self::Hourly,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => Self::Daily,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for UpdatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Update schedule hints from the RSS 1.0 syndication module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyndicationInfo {
    wrapper: ResourceWrapper,
}

impl SyndicationInfo {
    pub fn new(wrapper: ResourceWrapper) -> Self {
        Self { wrapper }
    }

    pub fn update_period(&self) -> UpdatePeriod {
        UpdatePeriod::from_name(&self.wrapper.text(syndication::UPDATE_PERIOD))
    }

    /// Updates per period; `1` when absent or not a number.
    pub fn update_frequency(&self) -> i32 {
        self.wrapper
            .text(syndication::UPDATE_FREQUENCY)
            .trim()
            .parse()
            .unwrap_or(1)
    }

    /// Reference date for the schedule, `0` if unknown.
    pub fn update_base(&self) -> i64 {
        parse_date(&self.wrapper.text(syndication::UPDATE_BASE), DateFormat::Iso8601)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::rdf::model::Model;
    use crate::rdf::node::Resource;

    fn wrapper_with(props: &[(&str, &str)]) -> ResourceWrapper {
        let mut model = Model::new();
        let res: Resource = model.create_resource("http://example.com/");
        for (pred, text) in props {
            let p = model.create_property(pred);
            let lit = model.create_literal(text);
            model.add_statement(&res, &p, &lit.into());
        }
        ResourceWrapper::new(Arc::new(model), res)
    }

    #[test]
    fn test_dublin_core_multi_values() {
        let dc = DublinCore::new(wrapper_with(&[
            (dc::CREATOR, "Alice"),
            (dc::CREATOR, "Bob"),
            (dc::DATE, "2004-01-02"),
        ]));
        assert_eq!(dc.creator(), "Alice");
        assert_eq!(dc.creators(), vec!["Alice", "Bob"]);
        assert_eq!(dc.date(), crate::util::parse_iso_date("2004-01-02T12:00:00Z"));
        assert_eq!(dc.language(), "");
    }

    #[test]
    fn test_syndication_defaults() {
        let info = SyndicationInfo::new(wrapper_with(&[]));
        assert_eq!(info.update_period(), UpdatePeriod::Daily);
        assert_eq!(info.update_frequency(), 1);
        assert_eq!(info.update_base(), 0);
    }

    #[test]
    fn test_syndication_values() {
        let info = SyndicationInfo::new(wrapper_with(&[
            (syndication::UPDATE_PERIOD, "hourly"),
            (syndication::UPDATE_FREQUENCY, "2"),
        ]));
        assert_eq!(info.update_period(), UpdatePeriod::Hourly);
        assert_eq!(info.update_frequency(), 2);

        let bad = SyndicationInfo::new(wrapper_with(&[
            (syndication::UPDATE_PERIOD, "fortnightly"),
            (syndication::UPDATE_FREQUENCY, "often"),
        ]));
        assert_eq!(bad.update_period(), UpdatePeriod::Daily);
        assert_eq!(bad.update_frequency(), 1);
    }

    #[test]
    fn test_period_names() {
        for p in [
            UpdatePeriod::Hourly,
            UpdatePeriod::Daily,
            UpdatePeriod::Weekly,
            UpdatePeriod::Monthly,
            UpdatePeriod::Yearly,
        ] {
            assert_eq!(UpdatePeriod::from_name(&p.to_string()), p);
        }
    }
}
