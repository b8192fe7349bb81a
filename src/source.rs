use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::XmlError;
use crate::util::calc_hash;
use crate::xml::{XmlDocument, XmlLimits};

/// Raw feed bytes plus the URL they were fetched from.
///
/// The XML tree and the content hash are computed on first use and cached.
/// Cloning is cheap; clones share the cached state.
#[derive(Clone)]
pub struct DocumentSource {
    inner: Arc<Inner>,
}

struct Inner {
    bytes: Vec<u8>,
    url: String,
    limits: XmlLimits,
    document: OnceLock<Result<XmlDocument, XmlError>>,
    hash: OnceLock<u32>,
}

impl DocumentSource {
    pub fn new(bytes: impl Into<Vec<u8>>, url: impl Into<String>) -> Self {
        Self::with_limits(bytes, url, XmlLimits::default())
    }

    /// Like [`DocumentSource::new`] but with explicit reader limits.
    pub fn with_limits(bytes: impl Into<Vec<u8>>, url: impl Into<String>, limits: XmlLimits) -> Self {
        Self {
            inner: Arc::new(Inner {
                bytes: bytes.into(),
                url: url.into(),
                limits,
                document: OnceLock::new(),
                hash: OnceLock::new(),
            }),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner.bytes
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    pub fn size(&self) -> usize {
        self.inner.bytes.len()
    }

    /// djb2 hash of the raw bytes; `0` for an empty source.
    pub fn hash(&self) -> u32 {
        *self.inner.hash.get_or_init(|| calc_hash(&self.inner.bytes))
    }

    /// The parsed XML tree, or `None` if the bytes could not be read into one.
    ///
    /// Parse failures are logged once and then remembered; see
    /// [`DocumentSource::xml_error`] for the reason.
    pub fn document(&self) -> Option<&XmlDocument> {
        self.read().as_ref().ok()
    }

    /// Why [`DocumentSource::document`] is `None`: malformed input, or a
    /// well-formed document over the size or nesting limits.
    pub fn xml_error(&self) -> Option<&XmlError> {
        self.read().as_ref().err()
    }

    fn read(&self) -> &Result<XmlDocument, XmlError> {
        self.inner.document.get_or_init(|| {
            let parsed = XmlDocument::parse(&self.inner.bytes, self.inner.limits);
            if let Err(e) = &parsed {
                tracing::warn!(url = %self.inner.url, error = %e, "Source could not be read as XML");
            }
            parsed
        })
    }
}

impl Default for DocumentSource {
    fn default() -> Self {
        Self::new(Vec::new(), String::new())
    }
}

impl fmt::Debug for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSource")
            .field("url", &self.inner.url)
            .field("size", &self.inner.bytes.len())
            .finish_non_exhaustive()
    }
}
