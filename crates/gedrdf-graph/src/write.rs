//! RDF writers (boundary adapter): Turtle and N-Triples.
//!
//! Serialization is delegated to **Sophia**. Triples are converted into Sophia
//! terms in insertion order; blank nodes are labelled `b<k>` in order of first
//! appearance, so a graph built by the same sequence of inserts always
//! serializes to the same text.

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::term::{Literal, NodeId, Term, Triple};
use crate::vocab;
use sophia::api::prefix::{Prefix, PrefixMapPair};
use sophia::api::prelude::*;
use sophia::api::term::{BnodeId, LanguageTag, SimpleTerm};
use sophia::api::MownStr;
use sophia::turtle::serializer::nt::NtSerializer;
use sophia::turtle::serializer::turtle::{TurtleConfig, TurtleSerializer};
use std::collections::HashMap;

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

struct BlankLabels {
    labels: HashMap<NodeId, usize>,
}

impl BlankLabels {
    fn for_graph(graph: &Graph) -> Self {
        let mut labels = HashMap::new();
        for t in graph.iter() {
            let nodes = std::iter::once(t.subject).chain(t.object.as_node());
            for node in nodes {
                if graph.is_blank(node) {
                    let next = labels.len();
                    labels.entry(node).or_insert(next);
                }
            }
        }
        Self { labels }
    }

    fn label(&self, node: NodeId) -> String {
        // Every blank node reachable from a triple was labelled above.
        format!("b{}", self.labels.get(&node).copied().unwrap_or_default())
    }
}

fn iri_term(iri: &str) -> Result<SimpleTerm<'_>> {
    let iri = IriRef::new(MownStr::from(iri)).map_err(|e| GraphError::Term(e.to_string()))?;
    Ok(SimpleTerm::Iri(iri))
}

fn node_term<'g>(graph: &'g Graph, blanks: &BlankLabels, node: NodeId) -> Result<SimpleTerm<'g>> {
    match graph.iri_of(node) {
        Some(iri) => iri_term(iri),
        None => Ok(SimpleTerm::BlankNode(BnodeId::new_unchecked(MownStr::from(
            blanks.label(node),
        )))),
    }
}

fn literal_term(lit: &Literal) -> Result<SimpleTerm<'_>> {
    let lexical = MownStr::from(lit.lexical.as_str());
    if let Some(lang) = &lit.language {
        let tag = LanguageTag::new(MownStr::from(lang.as_str()))
            .map_err(|e| GraphError::Term(e.to_string()))?;
        return Ok(SimpleTerm::LiteralLanguage(lexical, tag));
    }
    let datatype = lit.datatype.as_deref().unwrap_or(XSD_STRING);
    let datatype =
        IriRef::new(MownStr::from(datatype)).map_err(|e| GraphError::Term(e.to_string()))?;
    Ok(SimpleTerm::LiteralDatatype(lexical, datatype))
}

fn sophia_triple<'g>(
    graph: &'g Graph,
    blanks: &BlankLabels,
    t: &'g Triple,
) -> Result<[SimpleTerm<'g>; 3]> {
    let object = match &t.object {
        Term::Node(node) => node_term(graph, blanks, *node)?,
        Term::Literal(lit) => literal_term(lit)?,
    };
    Ok([
        node_term(graph, blanks, t.subject)?,
        iri_term(&t.predicate)?,
        object,
    ])
}

/// The graph's triples as Sophia terms, in insertion order.
fn sophia_triples(graph: &Graph) -> Result<Vec<[SimpleTerm<'_>; 3]>> {
    let blanks = BlankLabels::for_graph(graph);
    graph
        .iter()
        .map(|t| sophia_triple(graph, &blanks, t))
        .collect()
}

fn prefix_map() -> Vec<PrefixMapPair> {
    vocab::PREFIXES
        .iter()
        .map(|(prefix, ns)| {
            (
                Prefix::new_unchecked(Box::from(*prefix)),
                Iri::new_unchecked(Box::from(*ns)),
            )
        })
        .collect()
}

fn serialize_error(format: &'static str, message: impl ToString) -> GraphError {
    GraphError::Serialize {
        format,
        message: message.to_string(),
    }
}

/// Serialize as N-Triples (one statement per line).
pub fn write_ntriples(graph: &Graph) -> Result<String> {
    let triples = sophia_triples(graph)?;
    let mut serializer = NtSerializer::new_stringifier();
    let text = serializer
        .serialize_graph(&triples)
        .map_err(|e| serialize_error("N-Triples", e))?
        .to_string();
    Ok(text)
}

/// Serialize as pretty Turtle using the vocabulary prefixes.
pub fn write_turtle(graph: &Graph) -> Result<String> {
    let triples = sophia_triples(graph)?;
    let config = TurtleConfig::new()
        .with_pretty(true)
        .with_own_prefix_map(prefix_map());
    let mut serializer = TurtleSerializer::new_stringifier_with_config(config);
    let text = serializer
        .serialize_graph(&triples)
        .map_err(|e| serialize_error("Turtle", e))?
        .to_string();
    tracing::debug!(triples = triples.len(), bytes = text.len(), "turtle written");
    Ok(text)
}
