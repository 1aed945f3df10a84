//! Graph terms: opaque node handles and literals.

use std::fmt;

/// Opaque handle for a graph node (blank or IRI-named).
///
/// Handles are minted by a [`crate::Graph`] and are only meaningful for the
/// graph that minted them. Equality of handles is the identity criterion; the
/// `Display` form (`_:n<k>`) exists for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:n{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    /// Plain string literal (no datatype, no language tag).
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }
}

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Node(NodeId),
    Literal(Literal),
}

impl Term {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Term::Node(node) => Some(*node),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            Term::Node(_) => None,
        }
    }

    /// Lexical form of a literal object.
    pub fn lexical(&self) -> Option<&str> {
        self.as_literal().map(|lit| lit.lexical.as_str())
    }
}

impl From<NodeId> for Term {
    fn from(node: NodeId) -> Self {
        Term::Node(node)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Literal(Literal::plain(value))
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::Literal(Literal::plain(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: NodeId,
    pub predicate: String,
    pub object: Term,
}
