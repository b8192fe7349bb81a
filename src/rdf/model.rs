use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

use super::node::{next_node_id, Literal, ModelId, Node, NodeId, Property, Resource, Sequence, Statement, NULL_ID};
use super::vocab::rdf;

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

type StatementKey = (NodeId, NodeId, NodeId);

/// An RDF graph: the canonical nodes and statements of one document.
///
/// Resources, properties and sequences are interned by URI, so asking for
/// the same URI twice yields the same id. Statements are unique per
/// `(subject, predicate, object)` and kept in insertion order, which is the
/// order "first match" queries observe.
#[derive(Debug)]
pub struct Model {
    id: ModelId,
    nodes: HashMap<NodeId, Node>,
    by_uri: HashMap<String, NodeId>,
    sequence_items: HashMap<NodeId, Vec<NodeId>>,
    statements: BTreeMap<u64, Statement>,
    keys: HashMap<StatementKey, u64>,
    by_subject: HashMap<NodeId, Vec<Statement>>,
    next_position: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            id: ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed)),
            nodes: HashMap::new(),
            by_uri: HashMap::new(),
            sequence_items: HashMap::new(),
            statements: BTreeMap::new(),
            keys: HashMap::new(),
            by_subject: HashMap::new(),
            next_position: 0,
        }
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    // ------------------------------------------------------------------------
    // Node creation
    // ------------------------------------------------------------------------

    /// Returns the canonical resource for `uri`, creating it if needed.
    ///
    /// An empty `uri` creates a new anonymous resource on every call.
    pub fn create_resource(&mut self, uri: &str) -> Resource {
        if !uri.is_empty() {
            if let Some(node) = self.by_uri.get(uri).and_then(|id| self.nodes.get(id)) {
                if let Some(res) = node.as_resource() {
                    return res.clone();
                }
            }
        }
        let res = Resource::new(next_node_id(), uri);
        self.insert_node(Node::Resource(res.clone()));
        res
    }

    /// Returns the canonical property for `uri`.
    ///
    /// A plain resource already interned under `uri` is upgraded in place,
    /// keeping its id so existing statements stay valid.
    pub fn create_property(&mut self, uri: &str) -> Property {
        let existing = self.by_uri.get(uri).and_then(|id| self.nodes.get(id)).cloned();
        match existing {
            Some(Node::Property(p)) => p,
            Some(Node::Sequence(s)) => Property::new(s.id(), uri),
            Some(Node::Resource(r)) => {
                let prop = Property::new(r.id(), uri);
                self.nodes.insert(r.id(), Node::Property(prop.clone()));
                prop
            }
            _ => {
                let prop = Property::new(next_node_id(), uri);
                self.insert_node(Node::Property(prop.clone()));
                prop
            }
        }
    }

    /// Returns the canonical sequence for `uri`; an empty `uri` creates a new
    /// anonymous sequence. A plain resource for `uri` is upgraded, keeping its id.
    pub fn create_sequence(&mut self, uri: &str) -> Sequence {
        if !uri.is_empty() {
            let existing = self.by_uri.get(uri).and_then(|id| self.nodes.get(id)).cloned();
            match existing {
                Some(Node::Sequence(s)) => return s,
                Some(Node::Resource(r)) => {
                    let seq = Sequence::new(r.id(), uri);
                    self.nodes.insert(r.id(), Node::Sequence(seq.clone()));
                    return seq;
                }
                Some(Node::Property(p)) => return Sequence::new(p.id(), uri),
                _ => {}
            }
        }
        let seq = Sequence::new(next_node_id(), uri);
        self.insert_node(Node::Sequence(seq.clone()));
        seq
    }

    /// Creates a new literal. Literals are never interned.
    pub fn create_literal(&mut self, text: &str) -> Literal {
        let lit = Literal::new(next_node_id(), text);
        self.insert_node(Node::Literal(lit.clone()));
        lit
    }

    fn insert_node(&mut self, node: Node) {
        if let Some(res) = node.as_resource() {
            if !res.is_anon() {
                self.by_uri.insert(res.uri().to_string(), res.id());
            }
        }
        self.nodes.insert(node.id(), node);
    }

    /// Maps a node to its id in this model, adopting it if the model has
    /// not seen it yet.
    fn intern(&mut self, node: &Node) -> NodeId {
        if node.is_null() {
            return NULL_ID;
        }
        if let Some(res) = node.as_resource() {
            if !res.is_anon() {
                if let Some(&id) = self.by_uri.get(res.uri()) {
                    return id;
                }
            }
        }
        if !self.nodes.contains_key(&node.id()) {
            self.insert_node(node.clone());
        }
        node.id()
    }

    /// Id of `res` in this model without adopting it.
    fn lookup(&self, res: &Resource) -> Option<NodeId> {
        if res.is_null() {
            return None;
        }
        if res.is_anon() {
            self.nodes.contains_key(&res.id()).then_some(res.id())
        } else {
            self.by_uri.get(res.uri()).copied()
        }
    }

    // ------------------------------------------------------------------------
    // Sequences
    // ------------------------------------------------------------------------

    /// Appends `node` to the member list of `seq`.
    pub fn sequence_append(&mut self, seq: &Sequence, node: &Node) {
        let seq_id = self.intern(&Node::Sequence(seq.clone()));
        let node_id = self.intern(node);
        if seq_id == NULL_ID || node_id == NULL_ID {
            return;
        }
        self.sequence_items.entry(seq_id).or_default().push(node_id);
    }

    pub fn sequence_items(&self, seq: &Sequence) -> Vec<Node> {
        self.lookup(seq.as_resource())
            .and_then(|id| self.sequence_items.get(&id))
            .map(|ids| ids.iter().map(|id| self.node_by_id(*id)).collect())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    /// Adds `(subject, predicate, object)`, returning the existing statement
    /// if the triple is already present.
    ///
    /// Nodes created by another model are adopted: named resources map onto
    /// this model's resource with the same URI, others are copied in.
    pub fn add_statement(&mut self, subject: &Resource, predicate: &Property, object: &Node) -> Statement {
        let s = self.intern(&Node::Resource(subject.clone()));
        let p = self.intern(&Node::Property(predicate.clone()));
        let o = self.intern(object);
        if s == NULL_ID || p == NULL_ID || o == NULL_ID {
            return Statement::null();
        }

        if let Some(stmt) = self.keys.get(&(s, p, o)).and_then(|pos| self.statements.get(pos)) {
            return *stmt;
        }

        let stmt = Statement {
            subject: s,
            predicate: p,
            object: o,
            model: self.id,
        };
        let position = self.next_position;
        self.next_position += 1;
        self.statements.insert(position, stmt);
        self.keys.insert((s, p, o), position);
        self.by_subject.entry(s).or_default().push(stmt);
        stmt
    }

    /// Removes the triple if present.
    pub fn remove_statement(&mut self, subject: &Resource, predicate: &str, object: &Node) {
        let Some(s) = self.lookup(subject) else { return };
        let Some(&p) = self.by_uri.get(predicate) else { return };
        let o = match object.as_resource() {
            Some(res) => match self.lookup(res) {
                Some(id) => id,
                None => return,
            },
            None => object.id(),
        };
        self.remove_key((s, p, o));
    }

    pub fn remove(&mut self, statement: &Statement) {
        if statement.model == self.id {
            self.remove_key((statement.subject, statement.predicate, statement.object));
        }
    }

    fn remove_key(&mut self, key: StatementKey) {
        if let Some(position) = self.keys.remove(&key) {
            self.statements.remove(&position);
            if let Some(list) = self.by_subject.get_mut(&key.0) {
                list.retain(|st| (st.subject, st.predicate, st.object) != key);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// All statements in insertion order.
    pub fn statements(&self) -> Vec<Statement> {
        self.statements.values().copied().collect()
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Subjects of all `(x, rdf:type, type_uri)` statements, in insertion order.
    pub fn resources_with_type(&self, type_uri: &str) -> Vec<Resource> {
        let (Some(&type_pred), Some(&type_obj)) = (self.by_uri.get(rdf::TYPE), self.by_uri.get(type_uri)) else {
            return Vec::new();
        };
        self.statements
            .values()
            .filter(|st| st.predicate == type_pred && st.object == type_obj)
            .map(|st| self.resource_by_id(st.subject))
            .collect()
    }

    pub fn node_by_id(&self, id: NodeId) -> Node {
        self.nodes.get(&id).cloned().unwrap_or_default()
    }

    /// The resource with `id`, or null if absent or not a resource.
    pub fn resource_by_id(&self, id: NodeId) -> Resource {
        self.nodes
            .get(&id)
            .and_then(Node::as_resource)
            .cloned()
            .unwrap_or_default()
    }

    /// The property with `id`. Sequences and resources used as predicates
    /// are returned in their property view.
    pub fn property_by_id(&self, id: NodeId) -> Property {
        match self.nodes.get(&id) {
            Some(Node::Property(p)) => p.clone(),
            Some(node) => node
                .as_resource()
                .filter(|r| !r.is_anon())
                .map(|r| Property::new(r.id(), r.uri()))
                .unwrap_or_default(),
            None => Property::null(),
        }
    }

    pub fn literal_by_id(&self, id: NodeId) -> Literal {
        match self.nodes.get(&id) {
            Some(Node::Literal(l)) => l.clone(),
            _ => Literal::null(),
        }
    }

    fn subject_statements<'a>(&'a self, resource: &Resource, predicate: &str) -> impl Iterator<Item = &'a Statement> {
        let subject = self.lookup(resource);
        let pred = self.by_uri.get(predicate).copied();
        subject
            .zip(pred)
            .and_then(|(s, p)| self.by_subject.get(&s).map(|list| (list, p)))
            .into_iter()
            .flat_map(|(list, p)| list.iter().filter(move |st| st.predicate == p))
    }

    pub fn resource_has_property(&self, resource: &Resource, predicate: &str) -> bool {
        self.subject_statements(resource, predicate).next().is_some()
    }

    /// First statement (in insertion order) with this subject and predicate,
    /// or a null statement.
    pub fn resource_property(&self, resource: &Resource, predicate: &str) -> Statement {
        self.subject_statements(resource, predicate)
            .next()
            .copied()
            .unwrap_or_default()
    }

    pub fn resource_properties(&self, resource: &Resource, predicate: &str) -> Vec<Statement> {
        self.subject_statements(resource, predicate).copied().collect()
    }

    /// Human-readable dump of all statements, one per line.
    pub fn debug_info(&self) -> String {
        let mut info = String::new();
        for st in self.statements.values() {
            let _ = writeln!(
                info,
                "<{}> <{}> \"{}\"",
                st.subject(self).uri(),
                st.predicate(self).uri(),
                st.as_string(self)
            );
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::rss;
    use proptest::prelude::*;

    #[test]
    fn test_interning() {
        let mut model = Model::new();
        let a = model.create_resource("http://example.com/a");
        let b = model.create_resource("http://example.com/a");
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());

        let anon1 = model.create_resource("");
        let anon2 = model.create_resource("");
        assert_ne!(anon1, anon2);
        assert_ne!(anon1.id(), anon2.id());
    }

    #[test]
    fn test_idempotent_insertion() {
        let mut model = Model::new();
        let s = model.create_resource("http://s");
        let p = model.create_property("http://p");
        let o = model.create_resource("http://o");
        let first = model.add_statement(&s, &p, &o.clone().into());
        let second = model.add_statement(&s, &p, &o.into());
        assert_eq!(first, second);
        assert_eq!(model.statements().len(), 1);
    }

    #[test]
    fn test_literals_are_distinct() {
        let mut model = Model::new();
        let s = model.create_resource("http://s");
        let p = model.create_property("http://p");
        let l1 = model.create_literal("x");
        let l2 = model.create_literal("x");
        assert_ne!(l1.id(), l2.id());
        model.add_statement(&s, &p, &l1.into());
        model.add_statement(&s, &p, &l2.into());
        assert_eq!(model.resource_properties(&s, "http://p").len(), 2);
    }

    #[test]
    fn test_upgrade_preserves_id() {
        let mut model = Model::new();
        let res = model.create_resource("http://p");
        let prop = model.create_property("http://p");
        assert_eq!(res.id(), prop.id());
        assert!(model.node_by_id(res.id()).is_property());

        let res = model.create_resource("http://seq");
        let seq = model.create_sequence("http://seq");
        assert_eq!(res.id(), seq.id());
        assert!(model.node_by_id(res.id()).is_sequence());
    }

    #[test]
    fn test_statement_survives_upgrade() {
        let mut model = Model::new();
        let s = model.create_resource("http://s");
        let obj = model.create_resource("http://o");
        let p = model.create_property("http://p");
        let stmt = model.add_statement(&s, &p, &obj.clone().into());
        model.create_sequence("http://o");
        assert!(stmt.object(&model).is_sequence());
        assert_eq!(stmt.as_resource(&model), obj);
    }

    #[test]
    fn test_first_inserted_wins() {
        let mut model = Model::new();
        let s = model.create_resource("http://s");
        let p = model.create_property(rss::TITLE);
        let a = model.create_literal("first");
        let b = model.create_literal("second");
        model.add_statement(&s, &p, &a.into());
        model.add_statement(&s, &p, &b.into());
        assert_eq!(s.property(&model, rss::TITLE).as_string(&model), "first");
        assert!(s.has_property(&model, rss::TITLE));
        assert!(!s.has_property(&model, rss::LINK));
    }

    #[test]
    fn test_remove_statement() {
        let mut model = Model::new();
        let s = model.create_resource("http://s");
        let ty = model.create_property(rdf::TYPE);
        let channel = model.create_resource(rss::CHANNEL);
        model.add_statement(&s, &ty, &channel.clone().into());
        assert_eq!(model.resources_with_type(rss::CHANNEL), vec![s.clone()]);

        model.remove_statement(&s, rdf::TYPE, &channel.into());
        assert!(model.is_empty());
        assert!(model.resources_with_type(rss::CHANNEL).is_empty());
        assert!(!s.has_property(&model, rdf::TYPE));
    }

    #[test]
    fn test_foreign_nodes_are_adopted() {
        let mut other = Model::new();
        let foreign = other.create_resource("http://s");
        let foreign_prop = other.create_property("http://p");
        let foreign_lit = other.create_literal("v");

        let mut model = Model::new();
        let local = model.create_resource("http://s");
        let stmt = model.add_statement(&foreign, &foreign_prop, &foreign_lit.into());
        assert_eq!(stmt.subject(&model).id(), local.id());
        assert_eq!(stmt.as_string(&model), "v");
        // Statements do not resolve against a model they do not belong to.
        assert!(stmt.subject(&other).is_null());
    }

    #[test]
    fn test_sequence_members_keep_order() {
        let mut model = Model::new();
        let seq = model.create_sequence("");
        for uri in ["http://c", "http://a", "http://b"] {
            let r = model.create_resource(uri);
            model.sequence_append(&seq, &r.into());
        }
        let uris: Vec<_> = seq.items(&model).iter().map(|n| n.text().to_string()).collect();
        assert_eq!(uris, vec!["http://c", "http://a", "http://b"]);
    }

    #[test]
    fn test_null_queries() {
        let model = Model::new();
        let null = Resource::null();
        assert!(null.property(&model, rss::TITLE).is_null());
        assert!(null.properties(&model, rss::TITLE).is_empty());
        assert!(model.resource_by_id(NULL_ID).is_null());
        assert!(model.literal_by_id(12345).is_null());
        assert!(model.resources_with_type(rss::ITEM).is_empty());
    }

    proptest! {
        #[test]
        fn interning_is_stable(uris in proptest::collection::vec("[a-z]{1,6}", 1..20)) {
            let mut model = Model::new();
            let first: Vec<_> = uris.iter().map(|u| model.create_resource(u).id()).collect();
            let second: Vec<_> = uris.iter().map(|u| model.create_resource(u).id()).collect();
            prop_assert_eq!(first, second);
        }
    }
}
