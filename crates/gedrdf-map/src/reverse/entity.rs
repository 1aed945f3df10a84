//! Entity pass: person nodes → individuals.

use super::{event_detail, node_label, single_line};
use crate::error::{MapError, Result};
use crate::registry::IdentityRegistry;
use gedrdf_gedcom::{EventDetail, Individual, Name, Note, Sex, Xref};
use gedrdf_graph::query::{iri, var, Query};
use gedrdf_graph::{vocab, Graph, NodeId};
use std::collections::HashMap;

/// Individuals minted so far, with their source nodes.
pub(super) struct People {
    pub(super) individuals: Vec<Individual>,
    pub(super) registry: IdentityRegistry<NodeId, Xref>,
    position: HashMap<NodeId, usize>,
}

impl People {
    pub(super) fn individual_mut(&mut self, node: NodeId) -> Option<&mut Individual> {
        let index = *self.position.get(&node)?;
        self.individuals.get_mut(index)
    }

    /// Person nodes in minting order.
    pub(super) fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.registry.iter().map(|(node, _)| *node)
    }
}

pub(super) fn map_people(graph: &Graph) -> Result<People> {
    let mut people = People {
        individuals: Vec::new(),
        registry: IdentityRegistry::new(),
        position: HashMap::new(),
    };

    for (k, node) in graph.nodes_of_type(vocab::FOAF_PERSON).into_iter().enumerate() {
        let xref = Xref::new(format!("I{}", k + 1));
        let individual = individual_from(graph, node, xref.clone())?;
        people.registry.register(node, xref)?;
        people.position.insert(node, people.individuals.len());
        people.individuals.push(individual);
    }
    Ok(people)
}

fn individual_from(graph: &Graph, node: NodeId, xref: Xref) -> Result<Individual> {
    let mut individual = Individual::new(xref);

    let field = |predicate: &str, name: &'static str| {
        graph
            .literal(node, predicate)
            .map(|value| single_line(graph, node, name, value))
            .transpose()
    };

    let given = field(vocab::FOAF_GIVEN_NAME, "foaf:givenName")?;
    let family = field(vocab::FOAF_FAMILY_NAME, "foaf:familyName")?;
    if given.is_some() || family.is_some() {
        individual.name = Some(Name { given, family });
    }

    if let Some(gender) = graph.literal(node, vocab::FOAF_GENDER) {
        let sex = sex_from_gender(gender).ok_or_else(|| MapError::UnrecognizedSex {
            node: node_label(graph, node),
            value: gender.to_string(),
        })?;
        individual.sex = Some(sex.code().to_string());
    }

    individual.birth = life_event(graph, node, vocab::BIO_BIRTH)?;
    individual.death = life_event(graph, node, vocab::BIO_DEATH)?;

    individual.note = graph.literal(node, vocab::RDFS_COMMENT).map(Note::from_text);
    individual.title = field(vocab::FOAF_TITLE, "foaf:title")?;
    Ok(individual)
}

/// Exactly `male` / `female`; anything else has no record-format code.
pub(super) fn sex_from_gender(value: &str) -> Option<Sex> {
    match value {
        vocab::GENDER_MALE => Some(Sex::Male),
        vocab::GENDER_FEMALE => Some(Sex::Female),
        _ => None,
    }
}

/// The person's birth or death, if an event node for it exists.
///
/// The person's `bio:Birth`/`bio:Death` edge is followed first; otherwise an
/// event of that class naming the person as principal is used.
fn life_event(graph: &Graph, person: NodeId, class_iri: &str) -> Result<Option<EventDetail>> {
    let event = graph.object_nodes(person, class_iri).next().or_else(|| {
        Query::new()
            .pattern(var("e"), vocab::RDF_TYPE, iri(class_iri))
            .pattern(var("e"), vocab::BIO_PRINCIPAL, person)
            .select(graph)
            .first()
            .and_then(|row| row.node("e"))
    });
    event.map(|event| event_detail(graph, event)).transpose()
}
