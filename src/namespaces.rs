//! Namespace URIs of the extension modules read across formats.

pub const XHTML: &str = "http://www.w3.org/1999/xhtml";
pub const CONTENT: &str = "http://purl.org/rss/1.0/modules/content/";
pub const DUBLIN_CORE: &str = "http://purl.org/dc/elements/1.1/";
pub const ITUNES: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
pub const COMMENT_API: &str = "http://wellformedweb.org/CommentAPI/";
pub const SLASH: &str = "http://purl.org/rss/1.0/modules/slash/";
