//! Declarative pattern queries over a [`Graph`].
//!
//! A [`Query`] is a basic graph pattern (a conjunction of triple patterns)
//! plus zero or more optional groups that are left-joined onto each solution.
//! Results are row-wise variable bindings, in graph insertion order.
//!
//! ```
//! use gedrdf_graph::query::{iri, var, Query};
//! use gedrdf_graph::{vocab, Graph};
//!
//! let mut g = Graph::new();
//! let bob = g.blank_node();
//! g.insert_type(bob, vocab::FOAF_PERSON);
//! g.insert_literal(bob, vocab::FOAF_GIVEN_NAME, "Bob");
//!
//! let rows = Query::new()
//!     .pattern(var("p"), vocab::RDF_TYPE, iri(vocab::FOAF_PERSON))
//!     .optional([(var("p"), vocab::FOAF_GIVEN_NAME, var("given"))])
//!     .select(&g);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].literal("given"), Some("Bob"));
//! ```

use crate::graph::Graph;
use crate::term::{Literal, NodeId, Term, Triple};
use std::collections::BTreeMap;

/// Subject or object position of a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternTerm {
    Var(String),
    Node(NodeId),
    Iri(String),
    Literal(String),
}

pub fn var(name: &str) -> PatternTerm {
    PatternTerm::Var(name.to_string())
}

pub fn iri(iri: &str) -> PatternTerm {
    PatternTerm::Iri(iri.to_string())
}

pub fn lit(value: &str) -> PatternTerm {
    PatternTerm::Literal(value.to_string())
}

impl From<NodeId> for PatternTerm {
    fn from(node: NodeId) -> Self {
        PatternTerm::Node(node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: PatternTerm,
    pub predicate: String,
    pub object: PatternTerm,
}

impl<S, O> From<(S, &str, O)> for TriplePattern
where
    S: Into<PatternTerm>,
    O: Into<PatternTerm>,
{
    fn from((subject, predicate, object): (S, &str, O)) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.to_string(),
            object: object.into(),
        }
    }
}

/// One row of variable bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    bindings: BTreeMap<String, Term>,
}

impl Solution {
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings.get(name)
    }

    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.get(name).and_then(Term::as_node)
    }

    pub fn literal(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Term::lexical)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    fn bind(&mut self, name: &str, value: Term) {
        self.bindings.insert(name.to_string(), value);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    required: Vec<TriplePattern>,
    optional: Vec<Vec<TriplePattern>>,
    initial: Solution,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(
        mut self,
        subject: impl Into<PatternTerm>,
        predicate: &str,
        object: impl Into<PatternTerm>,
    ) -> Self {
        self.required.push((subject, predicate, object).into());
        self
    }

    /// Left-join a group of patterns: solutions that cannot extend the group
    /// are kept unchanged.
    pub fn optional<I, P>(mut self, group: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<TriplePattern>,
    {
        self.optional.push(group.into_iter().map(Into::into).collect());
        self
    }

    /// Pre-bind a variable to a node.
    pub fn bind(mut self, name: &str, node: NodeId) -> Self {
        self.initial.bind(name, Term::Node(node));
        self
    }

    pub fn select(&self, graph: &Graph) -> Vec<Solution> {
        let mut solutions = eval_group(graph, &self.required, vec![self.initial.clone()]);
        for group in &self.optional {
            solutions = solutions
                .into_iter()
                .flat_map(|sol| {
                    let extended = eval_group(graph, group, vec![sol.clone()]);
                    if extended.is_empty() {
                        vec![sol]
                    } else {
                        extended
                    }
                })
                .collect();
        }
        solutions
    }

    pub fn ask(&self, graph: &Graph) -> bool {
        !self.select(graph).is_empty()
    }
}

fn eval_group(graph: &Graph, patterns: &[TriplePattern], seed: Vec<Solution>) -> Vec<Solution> {
    patterns.iter().fold(seed, |solutions, pattern| {
        solutions
            .iter()
            .flat_map(|sol| match_pattern(graph, pattern, sol))
            .collect()
    })
}

/// A pattern position after substituting the current bindings.
enum Resolved<'a> {
    Unbound(&'a str),
    Bound(Term),
    /// A constant IRI the graph has never seen: nothing can match.
    Absent,
}

fn resolve<'a>(graph: &Graph, term: &'a PatternTerm, sol: &Solution) -> Resolved<'a> {
    match term {
        PatternTerm::Var(name) => match sol.get(name) {
            Some(value) => Resolved::Bound(value.clone()),
            None => Resolved::Unbound(name),
        },
        PatternTerm::Node(node) => Resolved::Bound(Term::Node(*node)),
        PatternTerm::Iri(iri) => match graph.lookup_iri(iri) {
            Some(node) => Resolved::Bound(Term::Node(node)),
            None => Resolved::Absent,
        },
        PatternTerm::Literal(value) => Resolved::Bound(Term::Literal(Literal::plain(value))),
    }
}

fn match_pattern(graph: &Graph, pattern: &TriplePattern, sol: &Solution) -> Vec<Solution> {
    let subject = resolve(graph, &pattern.subject, sol);
    let object = resolve(graph, &pattern.object, sol);
    if matches!(subject, Resolved::Absent) || matches!(object, Resolved::Absent) {
        return Vec::new();
    }

    let candidates: Box<dyn Iterator<Item = &Triple> + '_> = match (&subject, &object) {
        (Resolved::Bound(Term::Node(s)), _) => Box::new(graph.outgoing(*s)),
        // A literal in subject position never matches.
        (Resolved::Bound(Term::Literal(_)), _) => return Vec::new(),
        (_, Resolved::Bound(Term::Node(o))) => Box::new(graph.incoming(*o)),
        _ => Box::new(graph.iter()),
    };

    candidates
        .filter(|t| t.predicate == pattern.predicate)
        .filter_map(|t| {
            let mut next = sol.clone();
            unify(&subject, &Term::Node(t.subject), &mut next)?;
            unify(&object, &t.object, &mut next)?;
            Some(next)
        })
        .collect()
}

fn unify(position: &Resolved<'_>, actual: &Term, sol: &mut Solution) -> Option<()> {
    match position {
        Resolved::Unbound(name) => {
            // The same variable may occur twice in one pattern.
            match sol.get(name) {
                Some(existing) if existing != actual => return None,
                Some(_) => {}
                None => sol.bind(name, actual.clone()),
            }
            Some(())
        }
        Resolved::Bound(expected) => terms_match(expected, actual).then_some(()),
        Resolved::Absent => None,
    }
}

/// Plain literals in patterns match by lexical form regardless of datatype or
/// language tag; nodes match by identity.
fn terms_match(expected: &Term, actual: &Term) -> bool {
    match (expected, actual) {
        (Term::Node(a), Term::Node(b)) => a == b,
        (Term::Literal(a), Term::Literal(b)) => {
            if a.datatype.is_none() && a.language.is_none() {
                a.lexical == b.lexical
            } else {
                a == b
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab;

    fn family() -> (Graph, NodeId, NodeId, NodeId) {
        let mut g = Graph::new();
        let bob = g.blank_node();
        let joann = g.blank_node();
        let marriage = g.blank_node();
        g.insert_type(bob, vocab::FOAF_PERSON);
        g.insert_type(joann, vocab::FOAF_PERSON);
        g.insert_literal(bob, vocab::FOAF_GIVEN_NAME, "Bob");
        g.insert_literal(bob, vocab::FOAF_GENDER, "male");
        g.insert_literal(joann, vocab::FOAF_GIVEN_NAME, "Joann");
        g.insert_literal(joann, vocab::FOAF_GENDER, "female");
        g.insert_type(marriage, vocab::BIO_MARRIAGE);
        g.insert(marriage, vocab::BIO_PARTNER, bob);
        g.insert(marriage, vocab::BIO_PARTNER, joann);
        (g, bob, joann, marriage)
    }

    #[test]
    fn selects_persons_by_literal_constraints() {
        let (g, bob, _, _) = family();
        let rows = Query::new()
            .pattern(var("p"), vocab::RDF_TYPE, iri(vocab::FOAF_PERSON))
            .pattern(var("p"), vocab::FOAF_GENDER, lit("male"))
            .pattern(var("p"), vocab::FOAF_GIVEN_NAME, lit("Bob"))
            .select(&g);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].node("p"), Some(bob));
    }

    #[test]
    fn joins_across_nodes() {
        let (g, bob, joann, marriage) = family();
        assert!(Query::new()
            .pattern(var("m"), vocab::BIO_PARTNER, bob)
            .pattern(var("m"), vocab::BIO_PARTNER, joann)
            .ask(&g));

        let rows = Query::new()
            .pattern(marriage, vocab::BIO_PARTNER, var("x"))
            .pattern(var("x"), vocab::FOAF_GENDER, var("gender"))
            .select(&g);
        let genders: Vec<&str> = rows.iter().filter_map(|r| r.literal("gender")).collect();
        assert_eq!(genders, vec!["male", "female"]);
    }

    #[test]
    fn optional_groups_keep_unmatched_rows() {
        let (mut g, bob, joann, _) = family();
        g.insert_literal(bob, vocab::FOAF_FAMILY_NAME, "Cox");

        let rows = Query::new()
            .pattern(var("p"), vocab::RDF_TYPE, iri(vocab::FOAF_PERSON))
            .optional([(var("p"), vocab::FOAF_FAMILY_NAME, var("family"))])
            .select(&g);
        assert_eq!(rows.len(), 2);
        let bob_row = rows.iter().find(|r| r.node("p") == Some(bob)).unwrap();
        let joann_row = rows.iter().find(|r| r.node("p") == Some(joann)).unwrap();
        assert_eq!(bob_row.literal("family"), Some("Cox"));
        assert!(!joann_row.is_bound("family"));
    }

    #[test]
    fn prebound_variables_restrict_results() {
        let (g, _, joann, _) = family();
        let rows = Query::new()
            .bind("p", joann)
            .pattern(var("p"), vocab::FOAF_GIVEN_NAME, var("given"))
            .select(&g);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].literal("given"), Some("Joann"));
    }

    #[test]
    fn unknown_iri_matches_nothing() {
        let (g, _, _, _) = family();
        assert!(!Query::new()
            .pattern(var("p"), vocab::RDF_TYPE, iri("http://example.org/Unknown"))
            .ask(&g));
    }
}
