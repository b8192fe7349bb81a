use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::NsReader;
use std::sync::Arc;

use super::{Attribute, Element, XmlNode, XML_NAMESPACE};
use crate::error::XmlError;
use crate::util::complete_uri;

/// Default maximum document size (10 MiB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;

/// Default maximum element nesting depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Resource limits applied while reading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlLimits {
    /// SEC-014: Inputs larger than this are rejected before reading.
    pub max_document_size: u64,
    /// SEC-003: Documents nested deeper than this are rejected.
    pub max_nesting_depth: usize,
}

impl Default for XmlLimits {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// A parsed XML document: the root element of an immutable tree.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: Arc<Element>,
}

impl XmlDocument {
    /// Wraps an already-built element tree.
    pub fn from_root(root: Element) -> Self {
        Self { root: Arc::new(root) }
    }

    pub fn root(&self) -> &Arc<Element> {
        &self.root
    }

    /// Parses `input` with the default limits.
    pub fn parse_str(input: &str) -> Result<Self, XmlError> {
        Self::parse(input.as_bytes(), XmlLimits::default())
    }

    /// Reads raw bytes into an element tree.
    ///
    /// Bytes are decoded as UTF-8 (lossily, after stripping a BOM).
    /// Whitespace-only text is dropped from elements whose content is only
    /// child elements and whitespace, and kept in mixed content. Comments,
    /// processing instructions and the document type declaration are ignored.
    ///
    /// # Security
    ///
    /// SEC-002: `quick-xml` (0.37) never expands `<!ENTITY>` declarations, so
    /// external entities cannot be used to read local files. References are
    /// resolved against the fixed HTML5 entity table only; anything else is a
    /// parse error.
    pub fn parse(bytes: &[u8], limits: XmlLimits) -> Result<Self, XmlError> {
        let size = bytes.len() as u64;
        if size > limits.max_document_size {
            return Err(XmlError::TooLarge {
                size,
                max: limits.max_document_size,
            });
        }

        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = String::from_utf8_lossy(bytes);
        let mut reader = NsReader::from_str(&text);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_resolved_event() {
                Ok((ns, Event::Start(e))) => {
                    // SEC-003: Reject excessively nested documents
                    if stack.len() >= limits.max_nesting_depth {
                        return Err(XmlError::MaxDepthExceeded(limits.max_nesting_depth));
                    }
                    let ns = namespace_of(ns);
                    let el = open_element(&reader, ns, &e, stack.last());
                    stack.push(el);
                }
                Ok((ns, Event::Empty(e))) => {
                    if stack.len() >= limits.max_nesting_depth {
                        return Err(XmlError::MaxDepthExceeded(limits.max_nesting_depth));
                    }
                    let ns = namespace_of(ns);
                    let el = open_element(&reader, ns, &e, stack.last());
                    close_element(el, &mut stack, &mut root);
                }
                Ok((_, Event::End(_))) => {
                    if let Some(el) = stack.pop() {
                        close_element(el, &mut stack, &mut root);
                    }
                }
                Ok((_, Event::Text(t))) => {
                    let Some(parent) = stack.last_mut() else {
                        continue;
                    };
                    let value = t.unescape_with(resolve_html5_entity).map_err(|e| {
                        XmlError::Malformed {
                            position: reader.buffer_position() as u64,
                            message: e.to_string(),
                        }
                    })?;
                    parent.push_node(XmlNode::Text(value.into_owned()));
                }
                Ok((_, Event::CData(c))) => {
                    if let Some(parent) = stack.last_mut() {
                        let value = String::from_utf8_lossy(&c.into_inner()).into_owned();
                        parent.push_node(XmlNode::CData(value));
                    }
                }
                Ok((_, Event::Eof)) => break,
                Err(e) => {
                    return Err(XmlError::Malformed {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })
                }
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmlError::Malformed {
                position: reader.buffer_position() as u64,
                message: format!("unclosed element <{}>", open.qualified_name()),
            });
        }

        root.map(Self::from_root).ok_or(XmlError::NoRootElement)
    }
}

fn namespace_of(ns: ResolveResult<'_>) -> Option<String> {
    match ns {
        ResolveResult::Bound(uri) => Some(String::from_utf8_lossy(uri.as_ref()).into_owned()),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => None,
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Builds an element from a start tag, resolving attribute namespaces and
/// the scoped `xml:base` / `xml:lang` against the parent.
fn open_element(
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
    parent: Option<&Element>,
) -> Element {
    let mut el = Element {
        namespace,
        prefix: start.name().prefix().map(|p| lossy(p.as_ref())),
        local_name: lossy(start.local_name().as_ref()),
        ..Element::default()
    };

    for attr in start.attributes().with_checks(false) {
        let attr = match attr {
            Ok(a) => a,
            Err(e) => {
                tracing::debug!(element = %el.local_name, error = %e, "Skipping malformed attribute");
                continue;
            }
        };
        let value = match attr.unescape_value_with(resolve_html5_entity) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(element = %el.local_name, error = %e, "Keeping attribute value unescaped");
                Cow::Owned(lossy(&attr.value))
            }
        };

        if let Some(decl) = attr.key.as_namespace_binding() {
            let prefix = match decl {
                PrefixDeclaration::Default => None,
                PrefixDeclaration::Named(p) => Some(lossy(p)),
            };
            el.namespace_decls.push((prefix, value.into_owned()));
            continue;
        }

        let prefix = attr.key.prefix().map(|p| lossy(p.as_ref()));
        let (namespace, local_name) = if prefix.as_deref() == Some("xml") {
            (Some(XML_NAMESPACE.to_string()), lossy(attr.key.local_name().as_ref()))
        } else if prefix.is_none() {
            // Unprefixed attributes are never in the default namespace.
            (None, lossy(attr.key.local_name().as_ref()))
        } else {
            let (resolved, local) = reader.resolve_attribute(attr.key);
            (namespace_of(resolved), lossy(local.as_ref()))
        };

        el.attributes.push(Attribute {
            namespace,
            prefix,
            local_name,
            value: value.into_owned(),
        });
    }

    let parent_base = parent.and_then(|p| p.xml_base.as_deref());
    el.xml_base = match el.attribute_ns(XML_NAMESPACE, "base") {
        Some(base) => Some(complete_uri(parent_base, base)),
        None => parent_base.map(str::to_string),
    };
    el.xml_lang = el
        .attribute_ns(XML_NAMESPACE, "lang")
        .map(str::to_string)
        .or_else(|| parent.and_then(|p| p.xml_lang.clone()));

    el
}

fn close_element(mut el: Element, stack: &mut [Element], root: &mut Option<Element>) {
    el.drop_formatting_whitespace();
    match stack.last_mut() {
        Some(parent) => parent.push_node(XmlNode::Element(Arc::new(el))),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}
