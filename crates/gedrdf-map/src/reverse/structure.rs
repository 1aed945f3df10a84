//! Structural pass: marriage nodes → families, then family-of-origin links.

use super::entity::{sex_from_gender, People};
use super::{event_detail, node_label};
use crate::error::{MapError, Result, StructureIssue};
use crate::options::MapOptions;
use crate::registry::IdentityRegistry;
use gedrdf_gedcom::{Family, Sex, Xref};
use gedrdf_graph::{vocab, Graph, NodeId};

pub(super) struct Families {
    pub(super) families: Vec<Family>,
    pub(super) registry: IdentityRegistry<NodeId, Xref>,
}

pub(super) fn map_families(
    graph: &Graph,
    people: &mut People,
    options: &MapOptions,
) -> Result<Families> {
    let mut out = Families {
        families: Vec::new(),
        registry: IdentityRegistry::new(),
    };

    for (k, marriage) in graph.nodes_of_type(vocab::BIO_MARRIAGE).into_iter().enumerate() {
        let (husband, wife) = spouses(graph, marriage)?;
        let referrer = node_label(graph, marriage);
        let husband_xref = person_xref(graph, people, husband, &referrer)?;
        let wife_xref = person_xref(graph, people, wife, &referrer)?;

        let xref = Xref::new(format!("F{}", k + 1));
        let mut family = Family::new(xref.clone());
        family.husband = Some(husband_xref);
        family.wife = Some(wife_xref);
        family.marriage = Some(event_detail(graph, marriage)?);

        for spouse in [husband, wife] {
            if let Some(individual) = people.individual_mut(spouse) {
                individual.fams.push(xref.clone());
            }
        }
        out.registry.register(marriage, xref)?;
        out.families.push(family);
    }

    if options.infer_parentage {
        link_children(graph, people, &mut out.families)?;
    }
    Ok(out)
}

/// `(husband, wife)` of a marriage node; fails for any other shape.
fn spouses(graph: &Graph, marriage: NodeId) -> Result<(NodeId, NodeId)> {
    let unsupported = |issue| MapError::UnsupportedStructure {
        node: node_label(graph, marriage),
        issue,
    };

    let partners: Vec<NodeId> = graph.object_nodes(marriage, vocab::BIO_PARTNER).collect();
    let [first, second] = partners[..] else {
        return Err(unsupported(StructureIssue::PartnerCount(partners.len())));
    };

    let gender = |partner: NodeId| -> Result<Sex> {
        let label = node_label(graph, partner);
        match graph.literal(partner, vocab::FOAF_GENDER) {
            None => Err(unsupported(StructureIssue::MissingPartnerGender { partner: label })),
            Some(value) => sex_from_gender(value).ok_or_else(|| {
                unsupported(StructureIssue::UnrecognizedPartnerGender {
                    partner: label,
                    value: value.to_string(),
                })
            }),
        }
    };

    match (gender(first)?, gender(second)?) {
        (Sex::Male, Sex::Female) => Ok((first, second)),
        (Sex::Female, Sex::Male) => Ok((second, first)),
        (Sex::Male, Sex::Male) => Err(unsupported(StructureIssue::SameGender(vocab::GENDER_MALE))),
        _ => Err(unsupported(StructureIssue::SameGender(vocab::GENDER_FEMALE))),
    }
}

fn person_xref(graph: &Graph, people: &People, node: NodeId, referrer: &str) -> Result<Xref> {
    people
        .registry
        .get(&node)
        .cloned()
        .ok_or_else(|| MapError::DanglingReference {
            id: node_label(graph, node),
            referrer: referrer.to_string(),
        })
}

/// Attach each person whose recorded father and mother are partners in
/// exactly one family to that family.
fn link_children(graph: &Graph, people: &mut People, families: &mut [Family]) -> Result<()> {
    let nodes: Vec<NodeId> = people.nodes().collect();
    let mut linked = 0usize;

    for child in nodes {
        let father = graph.object_nodes(child, vocab::BIO_FATHER).next();
        let mother = graph.object_nodes(child, vocab::BIO_MOTHER).next();
        if father.is_none() && mother.is_none() {
            continue;
        }

        let parents = (
            father.and_then(|n| people.registry.get(&n)),
            mother.and_then(|n| people.registry.get(&n)),
        );
        let (Some(father), Some(mother)) = parents else {
            tracing::warn!(
                person = %node_label(graph, child),
                "parents are not both recorded persons, leaving without family of origin"
            );
            continue;
        };

        let shared: Vec<usize> = families
            .iter()
            .enumerate()
            .filter(|(_, f)| {
                let partners: Vec<&Xref> = f.partners().collect();
                partners.contains(&father) && partners.contains(&mother)
            })
            .map(|(i, _)| i)
            .collect();

        let index = match shared[..] {
            [index] => index,
            [] => {
                tracing::warn!(
                    person = %node_label(graph, child),
                    "parents share no marriage, leaving without family of origin"
                );
                continue;
            }
            _ => {
                return Err(MapError::UnsupportedStructure {
                    node: node_label(graph, child),
                    issue: StructureIssue::AmbiguousParentFamily(shared.len()),
                })
            }
        };

        let family = &mut families[index];
        let Some(individual) = people.individual_mut(child) else {
            continue;
        };
        if !family.children.contains(&individual.xref) {
            family.children.push(individual.xref.clone());
        }
        if !individual.famc.contains(&family.xref) {
            individual.famc.push(family.xref.clone());
        }
        linked += 1;
    }

    tracing::debug!(children = linked, "parentage links inferred");
    Ok(())
}
