//! Parser-collection configuration, optionally loaded from a TOML file.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged, since they are usually typos.
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::xml::XmlLimits;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Settings for [`crate::ParserCollection::from_config`] and document reading.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Order in which the built-in parsers are registered and probed.
    /// Known names: `rss2`, `atom`, `rdf`.
    pub format_order: Vec<String>,

    /// Number of leading items sampled when deciding whether a feed's
    /// titles and descriptions contain markup.
    pub markup_sample_size: usize,

    /// Documents larger than this many bytes are not parsed.
    pub max_document_size: u64,

    /// Documents nested deeper than this are not parsed.
    pub max_nesting_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        let limits = XmlLimits::default();
        Self {
            format_order: vec!["rss2".to_string(), "atom".to_string(), "rdf".to_string()],
            markup_sample_size: 10,
            max_document_size: limits.max_document_size,
            max_nesting_depth: limits.max_nesting_depth,
        }
    }
}

impl Config {
    /// SEC-014: Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 4] = [
        "format_order",
        "markup_sample_size",
        "max_document_size",
        "max_nesting_depth",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // SEC-014: Check file size before reading
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Blank text yields the defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::debug!(formats = ?config.format_order, "Loaded configuration");
        Ok(config)
    }

    /// Reader limits derived from this configuration.
    pub fn xml_limits(&self) -> XmlLimits {
        XmlLimits {
            max_document_size: self.max_document_size,
            max_nesting_depth: self.max_nesting_depth,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
