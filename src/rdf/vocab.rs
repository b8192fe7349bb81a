//! Fixed URI tables for the vocabularies the RDF parser understands.

/// RDF syntax vocabulary.
pub mod rdf {
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const SEQ: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq";
    pub const LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
}

/// RSS 1.0.
pub mod rss {
    pub const NAMESPACE: &str = "http://purl.org/rss/1.0/";
    pub const TITLE: &str = "http://purl.org/rss/1.0/title";
    pub const LINK: &str = "http://purl.org/rss/1.0/link";
    pub const DESCRIPTION: &str = "http://purl.org/rss/1.0/description";
    pub const NAME: &str = "http://purl.org/rss/1.0/name";
    pub const URL: &str = "http://purl.org/rss/1.0/url";
    pub const IMAGE: &str = "http://purl.org/rss/1.0/image";
    pub const TEXTINPUT: &str = "http://purl.org/rss/1.0/textinput";
    pub const ITEMS: &str = "http://purl.org/rss/1.0/items";
    pub const CHANNEL: &str = "http://purl.org/rss/1.0/channel";
    pub const ITEM: &str = "http://purl.org/rss/1.0/item";
}

/// RSS 0.9 (Netscape).
pub mod rss09 {
    pub const NAMESPACE: &str = "http://my.netscape.com/rdf/simple/0.9/";
    pub const TITLE: &str = "http://my.netscape.com/rdf/simple/0.9/title";
    pub const LINK: &str = "http://my.netscape.com/rdf/simple/0.9/link";
    pub const DESCRIPTION: &str = "http://my.netscape.com/rdf/simple/0.9/description";
    pub const NAME: &str = "http://my.netscape.com/rdf/simple/0.9/name";
    pub const URL: &str = "http://my.netscape.com/rdf/simple/0.9/url";
    pub const IMAGE: &str = "http://my.netscape.com/rdf/simple/0.9/image";
    pub const TEXTINPUT: &str = "http://my.netscape.com/rdf/simple/0.9/textinput";
    pub const CHANNEL: &str = "http://my.netscape.com/rdf/simple/0.9/channel";
    pub const ITEM: &str = "http://my.netscape.com/rdf/simple/0.9/item";

    /// RSS 0.9 properties and their RSS 1.0 counterparts.
    pub const TO_RSS10: [(&str, &str); 7] = [
        (TITLE, super::rss::TITLE),
        (LINK, super::rss::LINK),
        (DESCRIPTION, super::rss::DESCRIPTION),
        (NAME, super::rss::NAME),
        (URL, super::rss::URL),
        (IMAGE, super::rss::IMAGE),
        (TEXTINPUT, super::rss::TEXTINPUT),
    ];
}

/// Dublin Core element set 1.1.
pub mod dc {
    pub const NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
    pub const CONTRIBUTOR: &str = "http://purl.org/dc/elements/1.1/contributor";
    pub const COVERAGE: &str = "http://purl.org/dc/elements/1.1/coverage";
    pub const CREATOR: &str = "http://purl.org/dc/elements/1.1/creator";
    pub const DATE: &str = "http://purl.org/dc/elements/1.1/date";
    pub const DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";
    pub const FORMAT: &str = "http://purl.org/dc/elements/1.1/format";
    pub const IDENTIFIER: &str = "http://purl.org/dc/elements/1.1/identifier";
    pub const LANGUAGE: &str = "http://purl.org/dc/elements/1.1/language";
    pub const PUBLISHER: &str = "http://purl.org/dc/elements/1.1/publisher";
    pub const RELATION: &str = "http://purl.org/dc/elements/1.1/relation";
    pub const RIGHTS: &str = "http://purl.org/dc/elements/1.1/rights";
    pub const SOURCE: &str = "http://purl.org/dc/elements/1.1/source";
    pub const SUBJECT: &str = "http://purl.org/dc/elements/1.1/subject";
    pub const TITLE: &str = "http://purl.org/dc/elements/1.1/title";
    pub const TYPE: &str = "http://purl.org/dc/elements/1.1/type";
}

/// RSS 1.0 syndication module.
pub mod syndication {
    pub const NAMESPACE: &str = "http://purl.org/rss/1.0/modules/syndication/";
    pub const UPDATE_PERIOD: &str = "http://purl.org/rss/1.0/modules/syndication/updatePeriod";
    pub const UPDATE_FREQUENCY: &str = "http://purl.org/rss/1.0/modules/syndication/updateFrequency";
    pub const UPDATE_BASE: &str = "http://purl.org/rss/1.0/modules/syndication/updateBase";
}

/// RSS 1.0 content module.
pub mod content {
    pub const NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
    pub const ENCODED: &str = "http://purl.org/rss/1.0/modules/content/encoded";
}

/// Namespace and element of the position marker injected into RSS 0.9 items.
pub(crate) mod internal {
    pub const NAMESPACE: &str = "urn:x-syndication:internal#";
    pub const ITEM_INDEX_LOCAL: &str = "itemIndex";
    pub const ITEM_INDEX: &str = "urn:x-syndication:internal#itemIndex";
}
