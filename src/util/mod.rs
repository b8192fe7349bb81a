//! Normalization heuristics shared by every format.
//!
//! This module provides reusable utilities for:
//!
//! - **Text processing**: markup detection, entity resolution, escaping and
//!   the `normalize` rules that turn titles and descriptions into HTML
//! - **Dates**: RFC 2822 / ISO 8601 parsing with fallback
//! - **Hashing**: djb2 content hashes and MD5-based id synthesis
//! - **Content classification**: mapping a `type` attribute to a [`ContentFormat`]
//! - **People**: splitting `"Name <mail>"` strings
//! - **URIs**: resolving relative references
//!
//! # Examples
//!
//! ```
//! use syndication::util::{normalize, parse_date, DateFormat};
//!
//! assert_eq!(normalize("Fish & Chips"), "Fish &amp; Chips");
//! assert_ne!(parse_date("Tue, 10 Jun 2003 04:00:00 GMT", DateFormat::Rfc2822), 0);
//! ```

mod content;
mod date;
mod hash;
mod person;
mod text;
mod url;

pub use content::{classify_content, ContentFormat};
pub use date::{format_date, parse_date, parse_iso_date, parse_rfc_date, DateFormat};
pub use hash::{calc_hash, calc_md5_sum, synthesize_id};
pub use person::person_from_string;
pub use text::{
    convert_newlines, escape_special_characters, html_to_plain_text, is_html, normalize,
    normalize_with, plain_text_to_html, resolve_entities, simplify_whitespace,
    string_contains_markup,
};
pub use url::{complete_uri, is_http_url, join_to_channel_link};
