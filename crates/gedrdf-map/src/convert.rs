//! Text-to-text conversions: parse, map, and serialize in one call.
//!
//! Output is rendered fully in memory; nothing is returned on failure.

use crate::error::Result;
use crate::forward::gedcom_to_rdf;
use crate::options::MapOptions;
use crate::reverse::rdf_to_gedcom;
use gedrdf_gedcom::{parse_gedcom, write_gedcom};
use gedrdf_graph::{read_graph, write_ntriples, write_turtle, Graph, GraphError, RdfFormat};

/// Serialize a graph in a text syntax we can write.
pub fn render_graph(graph: &Graph, format: RdfFormat) -> Result<String> {
    match format {
        RdfFormat::Turtle => Ok(write_turtle(graph)?),
        RdfFormat::NTriples => Ok(write_ntriples(graph)?),
        RdfFormat::RdfXml => Err(GraphError::UnsupportedFormat("rdf".to_string()).into()),
    }
}

/// GEDCOM text → RDF text.
pub fn gedcom_text_to_rdf(text: &str, format: RdfFormat, options: &MapOptions) -> Result<String> {
    let file = parse_gedcom(text)?;
    let output = gedcom_to_rdf(&file, options)?;
    render_graph(&output.graph, format)
}

/// RDF document → GEDCOM text.
pub fn rdf_to_gedcom_text(bytes: &[u8], format: RdfFormat, options: &MapOptions) -> Result<String> {
    let graph = read_graph(bytes, format)?;
    let output = rdf_to_gedcom(&graph, options)?;
    Ok(write_gedcom(&output.file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;

    #[test]
    fn rdf_xml_output_is_refused() {
        let err = render_graph(&Graph::new(), RdfFormat::RdfXml).unwrap_err();
        assert!(matches!(err, MapError::Graph(GraphError::UnsupportedFormat(_))));
    }

    #[test]
    fn parse_errors_are_wrapped() {
        let err = gedcom_text_to_rdf("not gedcom", RdfFormat::Turtle, &MapOptions::default())
            .unwrap_err();
        assert!(matches!(err, MapError::Gedcom(_)));
    }

    #[test]
    fn forward_text_uses_prefixes() {
        let text = "0 @I1@ INDI\n1 NAME Bob /Cox/\n1 SEX M\n";
        let turtle = gedcom_text_to_rdf(text, RdfFormat::Turtle, &MapOptions::default()).unwrap();
        assert!(turtle.contains("PREFIX foaf: <http://xmlns.com/foaf/0.1/>"));
        assert!(turtle.contains("foaf:givenName \"Bob\""));
        assert!(turtle.contains("a foaf:Person"));
    }
}
