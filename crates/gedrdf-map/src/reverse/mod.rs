//! Triple graph → record model.
//!
//! Two passes over a read-only graph:
//!
//! - [`entity`]: one `Individual` per `foaf:Person` node, registered
//!   `NodeId → Xref`.
//! - [`structure`]: one `Family` per `bio:Marriage` node, spouse
//!   cross-links, then (optionally) children attached to the single family
//!   their recorded parents share.
//!
//! Any fatal condition aborts before a [`GedcomFile`] is produced.

mod entity;
mod structure;

use crate::error::{MapError, Result};
use crate::options::MapOptions;
use crate::registry::IdentityRegistry;
use gedrdf_gedcom::{EventDetail, GedcomFile, Xref};
use gedrdf_graph::query::{var, Query};
use gedrdf_graph::{vocab, Graph, NodeId};

#[derive(Debug, Clone)]
pub struct ReverseOutput {
    pub file: GedcomFile,
    /// Person node → minted individual id.
    pub persons: IdentityRegistry<NodeId, Xref>,
    /// Marriage node → minted family id.
    pub families: IdentityRegistry<NodeId, Xref>,
}

/// Map a genealogy graph back to GEDCOM records.
pub fn rdf_to_gedcom(graph: &Graph, options: &MapOptions) -> Result<ReverseOutput> {
    let mut people = entity::map_people(graph)?;
    tracing::debug!(individuals = people.individuals.len(), "entity pass done");

    let families = structure::map_families(graph, &mut people, options)?;
    tracing::debug!(families = families.families.len(), "structural pass done");

    tracing::info!(
        individuals = people.individuals.len(),
        families = families.families.len(),
        "reverse mapping complete"
    );
    Ok(ReverseOutput {
        file: GedcomFile {
            individuals: people.individuals,
            families: families.families,
        },
        persons: people.registry,
        families: families.registry,
    })
}

/// Diagnostic name for a node: `<iri>` for named resources, the handle otherwise.
fn node_label(graph: &Graph, node: NodeId) -> String {
    match graph.iri_of(node) {
        Some(iri) => format!("<{iri}>"),
        None => node.to_string(),
    }
}

/// Reject a literal that would break out of its record line.
fn single_line(graph: &Graph, node: NodeId, field: &'static str, value: &str) -> Result<String> {
    if value.contains(['\n', '\r']) {
        return Err(MapError::LineBreakInValue {
            node: node_label(graph, node),
            field,
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Date and place of an event node. `bio:date` wins over `dc:date`.
fn event_detail(graph: &Graph, event: NodeId) -> Result<EventDetail> {
    let rows = Query::new()
        .bind("e", event)
        .optional([(var("e"), vocab::BIO_DATE, var("date"))])
        .optional([(var("e"), vocab::DC_DATE, var("dc_date"))])
        .optional([(var("e"), vocab::BIO_PLACE, var("place"))])
        .select(graph);

    let Some(row) = rows.first() else {
        return Ok(EventDetail::default());
    };
    let date = match row.literal("date") {
        Some(date) => Some(single_line(graph, event, "bio:date", date)?),
        None => row
            .literal("dc_date")
            .map(|date| single_line(graph, event, "dc:date", date))
            .transpose()?,
    };
    let place = row
        .literal("place")
        .map(|place| single_line(graph, event, "bio:place", place))
        .transpose()?;
    Ok(EventDetail { date, place })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_detail_prefers_bio_date() {
        let mut g = Graph::new();
        let e = g.blank_node();
        g.insert_literal(e, vocab::DC_DATE, "1 JAN 1900");
        g.insert_literal(e, vocab::BIO_DATE, "2 JAN 1900");
        g.insert_literal(e, vocab::BIO_PLACE, "York");
        let detail = event_detail(&g, e).unwrap();
        assert_eq!(detail.date.as_deref(), Some("2 JAN 1900"));
        assert_eq!(detail.place.as_deref(), Some("York"));
    }

    #[test]
    fn event_detail_falls_back_to_dc_date() {
        let mut g = Graph::new();
        let e = g.blank_node();
        g.insert_literal(e, vocab::DC_DATE, "1900");
        assert_eq!(event_detail(&g, e).unwrap().date.as_deref(), Some("1900"));
        let empty = g.blank_node();
        assert_eq!(event_detail(&g, empty).unwrap(), EventDetail::default());
    }

    #[test]
    fn multi_line_place_is_rejected() {
        let mut g = Graph::new();
        let e = g.blank_node();
        g.insert_literal(e, vocab::BIO_PLACE, "York\nEngland");
        match event_detail(&g, e).unwrap_err() {
            MapError::LineBreakInValue { field, value, .. } => {
                assert_eq!(field, "bio:place");
                assert_eq!(value, "York\nEngland");
            }
            other => panic!("expected line break error, got {other}"),
        }
    }

    #[test]
    fn carriage_return_in_date_is_rejected() {
        let mut g = Graph::new();
        let e = g.blank_node();
        g.insert_literal(e, vocab::DC_DATE, "1900\r");
        assert!(matches!(
            event_detail(&g, e),
            Err(MapError::LineBreakInValue { field: "dc:date", .. })
        ));
    }

    #[test]
    fn labels_prefer_iris() {
        let mut g = Graph::new();
        let named = g.named_node("http://example.org/bob");
        let blank = g.blank_node();
        assert_eq!(node_label(&g, named), "<http://example.org/bob>");
        assert_eq!(node_label(&g, blank), blank.to_string());
    }
}
