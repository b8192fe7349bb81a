//! Generic XML element tree consumed by the format parsers.
//!
//! The tree is read once by [`XmlDocument::parse`] (backed by `quick-xml`)
//! and never mutated afterwards. Elements are shared through [`Arc`], so the
//! format-specific wrappers can hold on to the element they describe without
//! copying it.
//!
//! Scoped attributes (`xml:base`, `xml:lang`) are resolved while reading and
//! stored on every element, which lets wrappers answer "what is my base URI"
//! without parent pointers.

mod reader;
mod wrapper;
mod writer;

use std::sync::Arc;

pub use reader::{XmlDocument, XmlLimits};
pub use wrapper::ElementWrapper;

use crate::namespaces::XHTML;
use crate::util::complete_uri;

/// Namespace bound to the reserved `xml:` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A namespace-qualified attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// A child node of an [`Element`].
#[derive(Debug, Clone)]
pub enum XmlNode {
    Element(Arc<Element>),
    Text(String),
    CData(String),
}

/// An XML element with resolved namespace, attributes and ordered children.
#[derive(Debug, Clone, Default)]
pub struct Element {
    namespace: Option<String>,
    prefix: Option<String>,
    local_name: String,
    attributes: Vec<Attribute>,
    /// `(prefix, uri)` pairs declared on this element; `None` is the default namespace.
    namespace_decls: Vec<(Option<String>, String)>,
    children: Vec<XmlNode>,
    xml_base: Option<String>,
    xml_lang: Option<String>,
}

impl Element {
    /// Creates an element without attributes or children.
    ///
    /// An empty `namespace` means "no namespace".
    pub fn new(namespace: &str, local_name: &str) -> Self {
        Self {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            local_name: local_name.to_string(),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------------
    // Name
    // ------------------------------------------------------------------------

    /// Namespace URI, or `""` when the element is not in a namespace.
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// `prefix:local` as written in the source, or just the local name.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// Namespace URI and local name concatenated, the key used for
    /// additional-property maps and RDF type URIs.
    pub fn expanded_name(&self) -> String {
        format!("{}{}", self.namespace(), self.local_name)
    }

    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace() == namespace
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the un-namespaced attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attribute_ns("", name)
    }

    /// Value of the un-namespaced attribute `name`, or `default` when absent.
    pub fn attribute_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).unwrap_or(default)
    }

    pub fn attribute_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == local_name && a.namespace.as_deref().unwrap_or("") == namespace)
            .map(|a| a.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn namespace_declarations(&self) -> &[(Option<String>, String)] {
        &self.namespace_decls
    }

    // ------------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------------

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Arc<Element>> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            _ => None,
        })
    }

    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    pub fn last_child_element(&self) -> Option<&Arc<Element>> {
        self.child_elements().last()
    }

    /// First direct child with the given namespace and local name.
    pub fn first_child_ns(&self, namespace: &str, local_name: &str) -> Option<&Arc<Element>> {
        self.child_elements().find(|el| el.is(namespace, local_name))
    }

    /// All direct children with the given namespace and local name, in document order.
    pub fn children_ns(&self, namespace: &str, local_name: &str) -> Vec<Arc<Element>> {
        self.child_elements()
            .filter(|el| el.is(namespace, local_name))
            .cloned()
            .collect()
    }

    /// All descendants (excluding `self`) with the given namespace and local
    /// name, in document order.
    pub fn descendants_ns(&self, namespace: &str, local_name: &str) -> Vec<Arc<Element>> {
        let mut found = Vec::new();
        self.collect_descendants(namespace, local_name, &mut found);
        found
    }

    fn collect_descendants(&self, namespace: &str, local_name: &str, found: &mut Vec<Arc<Element>>) {
        for child in self.child_elements() {
            if child.is(namespace, local_name) {
                found.push(Arc::clone(child));
            }
            child.collect_descendants(namespace, local_name, found);
        }
    }

    /// Trimmed text of the first direct child matching namespace and local name.
    ///
    /// `None` when there is no such child, which callers use to fall back to
    /// alternative elements (`<language>` then `<dc:language>`, ...).
    pub fn child_text_ns(&self, namespace: &str, local_name: &str) -> Option<String> {
        self.first_child_ns(namespace, local_name)
            .map(|el| el.text().trim().to_string())
    }

    /// Concatenated text of all descendant text and CDATA nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(t) | XmlNode::CData(t) => out.push_str(t),
                XmlNode::Element(el) => el.collect_text(out),
            }
        }
    }

    pub fn first_child_is_cdata(&self) -> bool {
        matches!(self.children.first(), Some(XmlNode::CData(_)))
    }

    /// Serializes the child nodes back to XML markup, trimmed.
    ///
    /// Child elements get the in-scope `xml:base` added when they do not
    /// carry one themselves, so relative links stay resolvable.
    pub fn child_nodes_as_xml(&self) -> String {
        writer::child_nodes_as_xml(self)
    }

    // ------------------------------------------------------------------------
    // Scoped attributes
    // ------------------------------------------------------------------------

    /// Effective `xml:base` for this element, resolved through its ancestors.
    pub fn xml_base(&self) -> Option<&str> {
        self.xml_base.as_deref()
    }

    /// Effective `xml:lang` for this element, inherited from its ancestors.
    pub fn xml_lang(&self) -> Option<&str> {
        self.xml_lang.as_deref()
    }

    /// Resolves `uri` against the effective `xml:base`.
    pub fn complete_uri(&self, uri: &str) -> String {
        complete_uri(self.xml_base(), uri)
    }

    // ------------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------------

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.push_element(child);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(XmlNode::Text(text.to_string()));
        self
    }

    /// Sets (or replaces) an un-namespaced attribute.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.is_none() && a.local_name == name)
        {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                namespace: None,
                prefix: None,
                local_name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Appends a child element, inheriting this element's scoped attributes
    /// where the child has none of its own.
    pub fn push_element(&mut self, mut child: Element) {
        if child.xml_base.is_none() {
            child.xml_base = self.xml_base.clone();
        }
        if child.xml_lang.is_none() {
            child.xml_lang = self.xml_lang.clone();
        }
        self.children.push(XmlNode::Element(Arc::new(child)));
    }

    pub(crate) fn push_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Removes whitespace-only text nodes unless this element holds mixed
    /// content: it is an XHTML element or has non-blank text of its own.
    pub(crate) fn drop_formatting_whitespace(&mut self) {
        let is_blank = |node: &XmlNode| matches!(node, XmlNode::Text(t) if t.trim().is_empty());
        let mixed = self.namespace.as_deref() == Some(XHTML)
            || self
                .children
                .iter()
                .any(|node| matches!(node, XmlNode::Text(_)) && !is_blank(node));
        if !mixed {
            self.children.retain(|node| !is_blank(node));
        }
    }

    /// Points namespace declarations bound to `from` at `to` instead.
    pub(crate) fn rebind_namespace(&mut self, from: &str, to: &str) {
        for (_, uri) in &mut self.namespace_decls {
            if uri == from {
                *uri = to.to_string();
            }
        }
    }

    /// Copy of this element with a different name and no children.
    pub(crate) fn renamed(&self, namespace: &str, local_name: &str) -> Element {
        Element {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            prefix: self.prefix.clone(),
            local_name: local_name.to_string(),
            attributes: self.attributes.clone(),
            namespace_decls: self.namespace_decls.clone(),
            children: Vec::new(),
            xml_base: self.xml_base.clone(),
            xml_lang: self.xml_lang.clone(),
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.namespace == other.namespace
                && self.local_name == other.local_name
                && self.attributes == other.attributes
                && self.text() == other.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<Element> {
        XmlDocument::parse_str(
            r#"<root xmlns="urn:a" xmlns:b="urn:b" xml:base="http://example.com/dir/" xml:lang="en">
                 <item id="1"><title>One</title></item>
                 <b:item id="2"><![CDATA[<p>two</p>]]></b:item>
                 <item id="3" xml:lang="de"><nested><item id="4"/></nested></item>
               </root>"#,
        )
        .unwrap()
        .root()
        .clone()
    }

    #[test]
    fn test_namespaced_lookup() {
        let root = sample();
        assert_eq!(root.namespace(), "urn:a");
        assert_eq!(root.children_ns("urn:a", "item").len(), 2);
        assert_eq!(root.children_ns("urn:b", "item").len(), 1);
        assert!(root.first_child_ns("", "item").is_none());
    }

    #[test]
    fn test_descendants_are_recursive_and_ordered() {
        let root = sample();
        let ids: Vec<_> = root
            .descendants_ns("urn:a", "item")
            .iter()
            .map(|el| el.attribute("id").unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_text_and_cdata() {
        let root = sample();
        let b = root.first_child_ns("urn:b", "item").unwrap();
        assert!(b.first_child_is_cdata());
        assert_eq!(b.text(), "<p>two</p>");
        assert_eq!(root.child_text_ns("urn:a", "missing"), None);
    }

    #[test]
    fn test_scoped_attributes_are_inherited() {
        let root = sample();
        let items = root.children_ns("urn:a", "item");
        assert_eq!(items[0].xml_lang(), Some("en"));
        assert_eq!(items[1].xml_lang(), Some("de"));
        assert_eq!(
            items[0].complete_uri("page.html"),
            "http://example.com/dir/page.html"
        );
    }

    #[test]
    fn test_attribute_default() {
        let el = Element::new("", "link").with_attribute("href", "a");
        assert_eq!(el.attribute_or("rel", "alternate"), "alternate");
        assert_eq!(el.attribute_or("href", "x"), "a");
        assert!(el.has_attribute("href"));
    }

    #[test]
    fn test_builder_inherits_scope() {
        let mut parent = Element::new("urn:x", "p");
        parent.xml_lang = Some("fr".into());
        parent.push_element(Element::new("urn:x", "c").with_text("hi"));
        let child = parent.first_child_ns("urn:x", "c").unwrap();
        assert_eq!(child.xml_lang(), Some("fr"));
        assert_eq!(parent.text(), "hi");
        assert_eq!(parent.expanded_name(), "urn:xp");
    }
}
