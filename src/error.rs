use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Outcome of a fetch-and-parse request.
///
/// The retrieval codes (`Aborted` through `OtherRetrieverError`) are never
/// produced by this crate; they exist so a retriever can pass its outcome
/// through the same closed set the parser uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Error)]
#[repr(u8)]
pub enum ErrorCode {
    /// No error occurred, the feed was parsed successfully.
    #[default]
    #[error("success")]
    Success = 0,

    /// Retrieval was aborted by the user.
    #[error("retrieval aborted")]
    Aborted = 1,

    /// Retrieval timed out.
    #[error("retrieval timed out")]
    Timeout = 2,

    /// The host name could not be resolved.
    #[error("unknown host")]
    UnknownHost = 3,

    /// The host was reached but reported the document as missing.
    #[error("file not found")]
    FileNotFound = 4,

    /// Any other retriever failure.
    #[error("retriever error")]
    OtherRetrieverError = 5,

    /// No parser accepted the source and it could not be read as XML
    /// (malformed, or over the configured reader limits).
    #[error("invalid XML")]
    InvalidXml = 6,

    /// The source is well-formed XML but no registered parser recognized it.
    #[error("XML document not accepted by any parser")]
    XmlNotAccepted = 7,

    /// A parser accepted the source but could not build a valid document from it.
    #[error("invalid feed format")]
    InvalidFormat = 8,
}

impl ErrorCode {
    /// Returns `false` for [`ErrorCode::Success`] and `true` for everything else.
    pub fn is_error(self) -> bool {
        self != ErrorCode::Success
    }
}

/// Errors raised while reading an XML document into an element tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The underlying reader rejected the input.
    #[error("XML parse error at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    /// SEC-003: Element nesting exceeds the configured limit.
    #[error("XML nesting depth exceeds maximum of {0} levels")]
    MaxDepthExceeded(usize),

    /// SEC-014: Input exceeds the configured size limit.
    #[error("XML document too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    /// The input contains no root element.
    #[error("XML document has no root element")]
    NoRootElement,
}

/// Errors that can occur while loading a [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}
