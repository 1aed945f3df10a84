//! RDF readers (boundary adapter).
//!
//! Parsing is delegated to **Sophia** (Turtle, N-Triples, RDF/XML). Each
//! parsed statement is converted through its N-Triples display form into the
//! local term model, then inserted into a [`Graph`]. Blank-node labels are
//! scoped to one document: the same label within a document maps to the same
//! [`NodeId`], and labels never leak between documents.

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::term::{Literal, NodeId, Term};
use sophia::api::prelude::*;
use std::collections::HashMap;
use std::path::Path;

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    RdfXml,
}

impl RdfFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "nt" | "ntriples" => Some(Self::NTriples),
            "ttl" | "turtle" => Some(Self::Turtle),
            "rdf" | "owl" | "xml" => Some(Self::RdfXml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| GraphError::UnsupportedFormat(ext.to_string()))
    }

    fn name(self) -> &'static str {
        match self {
            Self::NTriples => "N-Triples",
            Self::Turtle => "Turtle",
            Self::RdfXml => "RDF/XML",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedNode {
    Iri(String),
    Blank(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedObject {
    Node(ParsedNode),
    Literal(Literal),
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct ReadSinkError {
    message: String,
}

impl From<GraphError> for ReadSinkError {
    fn from(value: GraphError) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

/// Accumulates parsed statements into a graph, resolving blank labels.
struct GraphSink {
    graph: Graph,
    blanks: HashMap<String, NodeId>,
}

impl GraphSink {
    fn new() -> Self {
        Self {
            graph: Graph::new(),
            blanks: HashMap::new(),
        }
    }

    fn node(&mut self, node: ParsedNode) -> NodeId {
        match node {
            ParsedNode::Iri(iri) => self.graph.named_node(&iri),
            ParsedNode::Blank(label) => {
                if let Some(id) = self.blanks.get(&label) {
                    return *id;
                }
                let id = self.graph.blank_node();
                self.blanks.insert(label, id);
                id
            }
        }
    }

    fn push(&mut self, s: &str, p: &str, o: &str) -> std::result::Result<(), ReadSinkError> {
        let subject = parse_node_display(s)?;
        let ParsedNode::Iri(predicate) = parse_node_display(p)? else {
            // Generalized RDF (blank predicate): not representable, skip.
            return Ok(());
        };
        let object = parse_term_display(o)?;

        let subject = self.node(subject);
        let object = match object {
            ParsedObject::Node(node) => Term::Node(self.node(node)),
            ParsedObject::Literal(lit) => Term::Literal(lit),
        };
        self.graph.insert(subject, &predicate, object);
        Ok(())
    }
}

fn unescape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn parse_term_display(term: &str) -> Result<ParsedObject> {
    let s = term.trim();

    if let Some(rest) = s.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return Ok(ParsedObject::Node(ParsedNode::Iri(rest.to_string())));
    }

    if let Some(rest) = s.strip_prefix("_:") {
        return Ok(ParsedObject::Node(ParsedNode::Blank(rest.to_string())));
    }

    if s.starts_with('"') {
        let mut end_quote = None;
        let mut escaped = false;
        for (i, ch) in s.char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                end_quote = Some(i);
                break;
            }
        }
        let Some(end) = end_quote else {
            return Err(GraphError::Term(format!(
                "invalid literal (missing closing quote): {s}"
            )));
        };

        let lexical = unescape_rdf_string(&s[1..end]);
        let rest = s[end + 1..].trim();

        let mut language = None;
        let mut datatype = None;
        if let Some(lang) = rest.strip_prefix('@') {
            language = Some(lang.to_string());
        } else if let Some(dt) = rest.strip_prefix("^^") {
            let dt = dt.trim();
            if let Some(dt_iri) = dt.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
                datatype = Some(dt_iri.to_string());
            } else if !dt.is_empty() {
                datatype = Some(dt.to_string());
            }
        }

        // Simple literals are xsd:string; keep them plain.
        if datatype.as_deref() == Some(XSD_STRING) {
            datatype = None;
        }

        return Ok(ParsedObject::Literal(Literal {
            lexical,
            datatype,
            language,
        }));
    }

    Err(GraphError::Term(s.to_string()))
}

fn parse_node_display(term: &str) -> Result<ParsedNode> {
    match parse_term_display(term)? {
        ParsedObject::Node(node) => Ok(node),
        ParsedObject::Literal(_) => Err(GraphError::Term(format!(
            "expected IRI or blank node, got literal: {term}"
        ))),
    }
}

/// Parse an RDF document into a fresh graph.
pub fn read_graph(bytes: &[u8], format: RdfFormat) -> Result<Graph> {
    let reader = std::io::BufReader::new(std::io::Cursor::new(bytes));
    let mut sink = GraphSink::new();

    let outcome = match format {
        RdfFormat::NTriples => {
            let mut parser = sophia::turtle::parser::nt::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> std::result::Result<(), ReadSinkError> {
                    sink.push(&t.s().to_string(), &t.p().to_string(), &t.o().to_string())
                })
                .map_err(|e| e.to_string())
        }
        RdfFormat::Turtle => {
            let mut parser = sophia::turtle::parser::turtle::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> std::result::Result<(), ReadSinkError> {
                    sink.push(&t.s().to_string(), &t.p().to_string(), &t.o().to_string())
                })
                .map_err(|e| e.to_string())
        }
        RdfFormat::RdfXml => {
            let mut parser = sophia::xml::parser::parse_bufread(reader);
            parser
                .try_for_each_triple(|t| -> std::result::Result<(), ReadSinkError> {
                    sink.push(&t.s().to_string(), &t.p().to_string(), &t.o().to_string())
                })
                .map_err(|e| e.to_string())
        }
    };

    outcome.map_err(|message| GraphError::Parse {
        format: format.name(),
        message,
    })?;

    tracing::debug!(
        format = format.name(),
        triples = sink.graph.len(),
        "parsed RDF document"
    );
    Ok(sink.graph)
}

/// Read a file, choosing the format from its extension.
pub fn read_graph_file(path: &Path) -> Result<Graph> {
    let format = RdfFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    read_graph(&bytes, format)
}
