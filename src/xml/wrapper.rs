use std::sync::Arc;

use super::Element;

/// A possibly-null handle to an element, the base of every Atom and RSS 2
/// view type.
///
/// Every accessor on a null wrapper returns an empty value, so views built
/// on a missing element (an absent `<image>`, say) can be queried freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementWrapper {
    element: Option<Arc<Element>>,
}

impl From<Arc<Element>> for ElementWrapper {
    fn from(element: Arc<Element>) -> Self {
        Self::new(element)
    }
}

impl From<Option<Arc<Element>>> for ElementWrapper {
    fn from(element: Option<Arc<Element>>) -> Self {
        Self { element }
    }
}

impl ElementWrapper {
    pub fn new(element: Arc<Element>) -> Self {
        Self { element: Some(element) }
    }

    pub fn null() -> Self {
        Self::default()
    }

    pub fn is_null(&self) -> bool {
        self.element.is_none()
    }

    pub fn element(&self) -> Option<&Arc<Element>> {
        self.element.as_ref()
    }

    /// Un-namespaced attribute value, `""` when absent.
    pub fn attribute(&self, name: &str) -> String {
        self.attribute_or(name, "")
    }

    pub fn attribute_or(&self, name: &str, default: &str) -> String {
        self.element
            .as_deref()
            .map_or(default, |el| el.attribute_or(name, default))
            .to_string()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.element.as_deref().is_some_and(|el| el.has_attribute(name))
    }

    /// Trimmed text of the first direct child matching `namespace`/`local_name`.
    pub fn child_text(&self, namespace: &str, local_name: &str) -> String {
        self.element
            .as_deref()
            .and_then(|el| el.child_text_ns(namespace, local_name))
            .unwrap_or_default()
    }

    /// Like [`ElementWrapper::child_text`], but `None` when the child is missing.
    pub fn child_text_opt(&self, namespace: &str, local_name: &str) -> Option<String> {
        self.element
            .as_deref()
            .and_then(|el| el.child_text_ns(namespace, local_name))
    }

    pub fn first_child(&self, namespace: &str, local_name: &str) -> ElementWrapper {
        self.element
            .as_deref()
            .and_then(|el| el.first_child_ns(namespace, local_name))
            .cloned()
            .into()
    }

    pub fn children(&self, namespace: &str, local_name: &str) -> Vec<Arc<Element>> {
        self.element
            .as_deref()
            .map(|el| el.children_ns(namespace, local_name))
            .unwrap_or_default()
    }

    /// All text below the element, untrimmed.
    pub fn text(&self) -> String {
        self.element.as_deref().map(Element::text).unwrap_or_default()
    }

    pub fn child_nodes_as_xml(&self) -> String {
        self.element
            .as_deref()
            .map(Element::child_nodes_as_xml)
            .unwrap_or_default()
    }

    pub fn complete_uri(&self, uri: &str) -> String {
        match self.element.as_deref() {
            Some(el) => el.complete_uri(uri),
            None => uri.to_string(),
        }
    }

    pub fn xml_lang(&self) -> String {
        self.element
            .as_deref()
            .and_then(Element::xml_lang)
            .unwrap_or_default()
            .to_string()
    }

    /// Direct child elements whose `(namespace, local name)` is not listed in
    /// `handled`, in document order.
    pub fn unhandled_elements(&self, handled: &[(&str, &str)]) -> Vec<Arc<Element>> {
        let Some(el) = self.element.as_deref() else {
            return Vec::new();
        };
        el.child_elements()
            .filter(|child| !handled.iter().any(|(ns, local)| child.is(ns, local)))
            .cloned()
            .collect()
    }
}
