//! Indexed in-memory triple store.

use crate::term::{Literal, NodeId, Term, Triple};
use crate::vocab;
use std::collections::{HashMap, HashSet};

/// A set of triples with subject/object indexes.
///
/// Triples keep insertion order, so every traversal (and every serialization)
/// is deterministic for a given construction sequence.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// One slot per minted node; `Some(iri)` for named resources.
    nodes: Vec<Option<String>>,
    named: HashMap<String, NodeId>,
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    by_subject: HashMap<NodeId, Vec<usize>>,
    by_object: HashMap<NodeId, Vec<usize>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh anonymous node.
    pub fn blank_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(None);
        id
    }

    /// Intern an IRI-named node. The same IRI always yields the same handle.
    pub fn named_node(&mut self, iri: &str) -> NodeId {
        if let Some(id) = self.named.get(iri) {
            return *id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(iri.to_string()));
        self.named.insert(iri.to_string(), id);
        id
    }

    /// Look up an already-interned IRI without minting.
    pub fn lookup_iri(&self, iri: &str) -> Option<NodeId> {
        self.named.get(iri).copied()
    }

    pub fn iri_of(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.index()).and_then(|slot| slot.as_deref())
    }

    pub fn is_blank(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node.index()), Some(None))
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, subject: NodeId, predicate: &str, object: impl Into<Term>) -> bool {
        let triple = Triple {
            subject,
            predicate: predicate.to_string(),
            object: object.into(),
        };
        if self.seen.contains(&triple) {
            return false;
        }
        let index = self.triples.len();
        self.by_subject.entry(subject).or_default().push(index);
        if let Term::Node(obj) = &triple.object {
            self.by_object.entry(*obj).or_default().push(index);
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// `subject rdf:type class`.
    pub fn insert_type(&mut self, subject: NodeId, class_iri: &str) -> bool {
        let class = self.named_node(class_iri);
        self.insert(subject, vocab::RDF_TYPE, class)
    }

    pub fn insert_literal(&mut self, subject: NodeId, predicate: &str, value: &str) -> bool {
        self.insert(subject, predicate, Literal::plain(value))
    }

    pub fn contains(&self, subject: NodeId, predicate: &str, object: &Term) -> bool {
        self.outgoing(subject)
            .any(|t| t.predicate == predicate && &t.object == object)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Number of minted nodes (blank and named, including class IRIs).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All triples with the given subject, in insertion order.
    pub fn outgoing(&self, subject: NodeId) -> impl Iterator<Item = &Triple> {
        self.by_subject
            .get(&subject)
            .into_iter()
            .flatten()
            .map(move |i| &self.triples[*i])
    }

    /// All triples whose object is the given node, in insertion order.
    pub fn incoming(&self, object: NodeId) -> impl Iterator<Item = &Triple> {
        self.by_object
            .get(&object)
            .into_iter()
            .flatten()
            .map(move |i| &self.triples[*i])
    }

    /// Multi-valued lookup.
    pub fn objects<'g>(
        &'g self,
        subject: NodeId,
        predicate: &str,
    ) -> impl Iterator<Item = &'g Term> + 'g {
        let predicate = predicate.to_string();
        self.outgoing(subject)
            .filter(move |t| t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Single-valued lookup: the first object inserted for `(subject, predicate)`.
    pub fn object(&self, subject: NodeId, predicate: &str) -> Option<&Term> {
        self.objects(subject, predicate).next()
    }

    /// First literal object for `(subject, predicate)`, ignoring node objects.
    pub fn literal(&self, subject: NodeId, predicate: &str) -> Option<&str> {
        self.objects(subject, predicate).find_map(Term::lexical)
    }

    /// Node objects for `(subject, predicate)`, ignoring literals.
    pub fn object_nodes<'g>(
        &'g self,
        subject: NodeId,
        predicate: &str,
    ) -> impl Iterator<Item = NodeId> + 'g {
        self.objects(subject, predicate).filter_map(Term::as_node)
    }

    /// Subjects `s` such that `s predicate object` holds.
    pub fn subjects_with<'g>(
        &'g self,
        predicate: &str,
        object: NodeId,
    ) -> impl Iterator<Item = NodeId> + 'g {
        let predicate = predicate.to_string();
        self.incoming(object)
            .filter(move |t| t.predicate == predicate)
            .map(|t| t.subject)
    }

    /// Every node typed `class_iri`, in order of their type assertion.
    pub fn nodes_of_type(&self, class_iri: &str) -> Vec<NodeId> {
        let Some(class) = self.lookup_iri(class_iri) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.subjects_with(vocab::RDF_TYPE, class)
            .filter(|node| seen.insert(*node))
            .collect()
    }

    pub fn has_type(&self, node: NodeId, class_iri: &str) -> bool {
        match self.lookup_iri(class_iri) {
            Some(class) => self.contains(node, vocab::RDF_TYPE, &Term::Node(class)),
            None => false,
        }
    }
}
