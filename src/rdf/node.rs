//! Graph primitives: resources, properties, sequences, literals and statements.
//!
//! Nodes are small value handles (an id plus a URI or text). The graph
//! itself, including sequence members and statements, lives in the
//! [`Model`] that created them, and every query takes that model explicitly.

use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

use super::model::Model;

/// Identifier of a node. `0` is the null node.
pub type NodeId = u64;

pub const NULL_ID: NodeId = 0;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Ids come from one process-wide counter, so they are never reused across models.
pub(crate) fn next_node_id() -> NodeId {
    NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identifier of a [`Model`]. `0` never names a live model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub(crate) u64);

// ============================================================================
// Resource
// ============================================================================

/// A node identified by a URI, or an anonymous (blank) node identified only
/// by its id.
///
/// Two non-anonymous resources are equal when their URIs are equal;
/// anonymous resources are equal only to themselves (same id).
#[derive(Debug, Clone, Default)]
pub struct Resource {
    id: NodeId,
    uri: String,
}

impl Resource {
    pub(crate) fn new(id: NodeId, uri: impl Into<String>) -> Self {
        Self { id, uri: uri.into() }
    }

    /// The null resource. All queries on it return empty results.
    pub fn null() -> Self {
        Self::default()
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The URI, or `""` for anonymous and null resources.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn is_null(&self) -> bool {
        self.id == NULL_ID
    }

    pub fn is_anon(&self) -> bool {
        self.uri.is_empty()
    }

    pub fn has_property(&self, model: &Model, predicate: &str) -> bool {
        model.resource_has_property(self, predicate)
    }

    /// First statement with this subject and `predicate`, in insertion order.
    pub fn property(&self, model: &Model, predicate: &str) -> Statement {
        model.resource_property(self, predicate)
    }

    pub fn properties(&self, model: &Model, predicate: &str) -> Vec<Statement> {
        model.resource_properties(self, predicate)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        if self.is_anon() || other.is_anon() {
            self.is_anon() && other.is_anon() && self.id == other.id
        } else {
            self.uri == other.uri
        }
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_anon() {
            self.id.hash(state);
        } else {
            self.uri.hash(state);
        }
    }
}

// ============================================================================
// Property / Sequence
// ============================================================================

/// A resource used as a predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Property(Resource);

impl Property {
    pub(crate) fn new(id: NodeId, uri: impl Into<String>) -> Self {
        Self(Resource::new(id, uri))
    }

    pub fn null() -> Self {
        Self::default()
    }

    pub fn as_resource(&self) -> &Resource {
        &self.0
    }
}

impl Deref for Property {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.0
    }
}

/// A container resource with an ordered member list (`rdf:Seq`).
///
/// The members are stored in the owning model; see [`Sequence::items`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence(Resource);

impl Sequence {
    pub(crate) fn new(id: NodeId, uri: impl Into<String>) -> Self {
        Self(Resource::new(id, uri))
    }

    pub fn as_resource(&self) -> &Resource {
        &self.0
    }

    /// Members in append order.
    pub fn items(&self, model: &Model) -> Vec<Node> {
        model.sequence_items(self)
    }
}

impl Deref for Sequence {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.0
    }
}

// ============================================================================
// Literal
// ============================================================================

/// A string value. Literals are never interned: every one is distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Literal {
    id: NodeId,
    text: String,
}

impl Literal {
    pub(crate) fn new(id: NodeId, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }

    pub fn null() -> Self {
        Self::default()
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_null(&self) -> bool {
        self.id == NULL_ID
    }
}

// ============================================================================
// Node
// ============================================================================

/// Any graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Resource(Resource),
    Property(Property),
    Sequence(Sequence),
    Literal(Literal),
}

impl Default for Node {
    fn default() -> Self {
        Node::Literal(Literal::null())
    }
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Resource(r) => r.id(),
            Node::Property(p) => p.id(),
            Node::Sequence(s) => s.id(),
            Node::Literal(l) => l.id(),
        }
    }

    /// URI for resources, text for literals.
    pub fn text(&self) -> &str {
        match self {
            Node::Resource(r) => r.uri(),
            Node::Property(p) => p.uri(),
            Node::Sequence(s) => s.uri(),
            Node::Literal(l) => l.text(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.id() == NULL_ID
    }

    /// True for resources, properties and sequences.
    pub fn is_resource(&self) -> bool {
        !matches!(self, Node::Literal(_))
    }

    pub fn is_property(&self) -> bool {
        matches!(self, Node::Property(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    pub fn is_anon(&self) -> bool {
        self.as_resource().is_some_and(Resource::is_anon)
    }

    /// The resource view of this node, `None` for literals.
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Node::Resource(r) => Some(r),
            Node::Property(p) => Some(p.as_resource()),
            Node::Sequence(s) => Some(s.as_resource()),
            Node::Literal(_) => None,
        }
    }
}

impl From<Resource> for Node {
    fn from(r: Resource) -> Self {
        Node::Resource(r)
    }
}

impl From<Property> for Node {
    fn from(p: Property) -> Self {
        Node::Property(p)
    }
}

impl From<Sequence> for Node {
    fn from(s: Sequence) -> Self {
        Node::Sequence(s)
    }
}

impl From<Literal> for Node {
    fn from(l: Literal) -> Self {
        Node::Literal(l)
    }
}

// ============================================================================
// Statement
// ============================================================================

/// A `(subject, predicate, object)` triple.
///
/// A statement stores only node ids and the id of the model it belongs to.
/// Resolving it against any other model yields null nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Statement {
    pub(crate) subject: NodeId,
    pub(crate) predicate: NodeId,
    pub(crate) object: NodeId,
    pub(crate) model: ModelId,
}

impl Statement {
    pub fn null() -> Self {
        Self::default()
    }

    pub fn is_null(&self) -> bool {
        self.subject == NULL_ID
    }

    fn owned_by(&self, model: &Model) -> bool {
        !self.is_null() && self.model == model.id()
    }

    pub fn subject(&self, model: &Model) -> Resource {
        if !self.owned_by(model) {
            return Resource::null();
        }
        model.resource_by_id(self.subject)
    }

    pub fn predicate(&self, model: &Model) -> Property {
        if !self.owned_by(model) {
            return Property::null();
        }
        model.property_by_id(self.predicate)
    }

    pub fn object(&self, model: &Model) -> Node {
        if !self.owned_by(model) {
            return Node::default();
        }
        model.node_by_id(self.object)
    }

    /// The object as a resource; null if it is a literal.
    pub fn as_resource(&self, model: &Model) -> Resource {
        self.object(model).as_resource().cloned().unwrap_or_default()
    }

    /// The object's text: literal value or resource URI, `""` when null.
    pub fn as_string(&self, model: &Model) -> String {
        self.object(model).text().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_equality() {
        let a = Resource::new(1, "http://a");
        let b = Resource::new(2, "http://a");
        assert_eq!(a, b);

        let anon1 = Resource::new(3, "");
        let anon2 = Resource::new(4, "");
        assert_ne!(anon1, anon2);
        assert_eq!(anon1, anon1.clone());
        assert_ne!(anon1, a);
    }

    #[test]
    fn test_node_capabilities() {
        let p: Node = Property::new(5, "http://p").into();
        assert!(p.is_resource() && p.is_property() && !p.is_sequence());
        let l: Node = Literal::new(6, "text").into();
        assert!(l.is_literal() && !l.is_resource() && !l.is_anon());
        assert_eq!(l.text(), "text");
        let s: Node = Sequence::new(7, "").into();
        assert!(s.is_sequence() && s.is_anon());
    }

    #[test]
    fn test_null_values_are_empty() {
        assert!(Resource::null().is_null());
        assert_eq!(Resource::null().uri(), "");
        assert!(Literal::null().is_null());
        assert_eq!(Literal::null().text(), "");
        assert!(Node::default().is_null());
        let model = Model::new();
        let stmt = Statement::null();
        assert!(stmt.is_null());
        assert!(stmt.subject(&model).is_null());
        assert!(stmt.predicate(&model).is_null());
        assert!(stmt.object(&model).is_null());
        assert_eq!(stmt.as_string(&model), "");
        assert!(stmt.as_resource(&model).is_null());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = next_node_id();
        let b = next_node_id();
        assert!(b > a);
        assert_ne!(a, NULL_ID);
    }
}
