//! Record model → triple graph.
//!
//! The transform runs as an ordered pipeline over a read-only [`GedcomFile`]:
//!
//! 1. **persons**: one `foaf:Person` node per individual, with literals and
//!    birth/death events; every individual is registered here.
//! 2. **parentage**: `bio:father` / `bio:mother` edges, derived from each
//!    individual's family of origin. Runs after pass 1 because families may
//!    point at individuals that appear later in the file.
//! 3. **marriages**: one `bio:Marriage` node per family with a `MARR` event
//!    and at least one partner.

use crate::error::Result;
use crate::options::MapOptions;
use crate::registry::IdentityRegistry;
use gedrdf_gedcom::{EventDetail, Family, GedcomFile, Individual, Sex, Xref};
use gedrdf_graph::{vocab, Graph, NodeId};

/// Result of a successful forward transform.
#[derive(Debug, Clone)]
pub struct ForwardOutput {
    pub graph: Graph,
    /// Individual id → person node.
    pub persons: IdentityRegistry<Xref, NodeId>,
    /// Family id → marriage node, for families that produced one.
    pub marriages: IdentityRegistry<Xref, NodeId>,
}

/// An event node whose anchoring edges are already in place.
///
/// Birth/death nodes can only be built with their principal, and marriage
/// nodes only with at least one partner, so date/place can never be attached
/// to an unanchored event.
struct EventNode {
    node: NodeId,
}

impl EventNode {
    fn for_principal(graph: &mut Graph, class_iri: &str, principal: NodeId) -> Self {
        let node = graph.blank_node();
        graph.insert(principal, class_iri, node);
        graph.insert_type(node, class_iri);
        graph.insert(node, vocab::BIO_PRINCIPAL, principal);
        Self { node }
    }

    fn for_partners(graph: &mut Graph, partners: &[NodeId]) -> Option<Self> {
        if partners.is_empty() {
            return None;
        }
        let node = graph.blank_node();
        graph.insert_type(node, vocab::BIO_MARRIAGE);
        for partner in partners {
            graph.insert(node, vocab::BIO_PARTNER, *partner);
        }
        Some(Self { node })
    }

    fn attach(&self, graph: &mut Graph, detail: &EventDetail, options: &MapOptions) {
        if let Some(date) = &detail.date {
            graph.insert_literal(self.node, vocab::BIO_DATE, date);
            if options.mirror_dc_date {
                graph.insert_literal(self.node, vocab::DC_DATE, date);
            }
        }
        if let Some(place) = &detail.place {
            graph.insert_literal(self.node, vocab::BIO_PLACE, place);
        }
    }
}

struct ForwardMapper<'a> {
    file: &'a GedcomFile,
    options: &'a MapOptions,
    graph: Graph,
    persons: IdentityRegistry<Xref, NodeId>,
    /// Family id → position in `file.families`.
    families: IdentityRegistry<Xref, usize>,
    marriages: IdentityRegistry<Xref, NodeId>,
}

/// Map a GEDCOM file to a genealogy graph.
///
/// Fails without producing a graph on duplicate ids or on pointers to
/// records that are not in the file.
pub fn gedcom_to_rdf(file: &GedcomFile, options: &MapOptions) -> Result<ForwardOutput> {
    let mut mapper = ForwardMapper {
        file,
        options,
        graph: Graph::new(),
        persons: IdentityRegistry::new(),
        families: IdentityRegistry::new(),
        marriages: IdentityRegistry::new(),
    };

    mapper.index_families()?;
    mapper.map_persons()?;
    mapper.check_links()?;
    mapper.map_parentage()?;
    mapper.map_marriages()?;

    tracing::info!(
        persons = mapper.persons.len(),
        marriages = mapper.marriages.len(),
        triples = mapper.graph.len(),
        "forward mapping complete"
    );
    Ok(ForwardOutput {
        graph: mapper.graph,
        persons: mapper.persons,
        marriages: mapper.marriages,
    })
}

impl ForwardMapper<'_> {
    fn index_families(&mut self) -> Result<()> {
        for (i, family) in self.file.families.iter().enumerate() {
            self.families.register(family.xref.clone(), i)?;
        }
        Ok(())
    }

    fn family(&self, xref: &Xref, referrer: &Xref) -> Result<&Family> {
        let index = *self.families.resolve(xref, referrer)?;
        Ok(&self.file.families[index])
    }

    fn person(&self, xref: &Xref, referrer: &Xref) -> Result<NodeId> {
        self.persons.resolve(xref, referrer).copied()
    }

    fn map_persons(&mut self) -> Result<()> {
        let file = self.file;
        for individual in &file.individuals {
            if self.families.contains(&individual.xref) {
                return Err(crate::MapError::DuplicateId {
                    id: individual.xref.to_string(),
                });
            }
            let person = self.graph.blank_node();
            self.persons.register(individual.xref.clone(), person)?;
            self.map_person(individual, person);
        }
        tracing::debug!(persons = self.persons.len(), "person pass done");
        Ok(())
    }

    fn map_person(&mut self, individual: &Individual, person: NodeId) {
        let graph = &mut self.graph;
        graph.insert_type(person, vocab::FOAF_PERSON);

        let (given, family) = individual.name_parts();
        if let Some(given) = given {
            graph.insert_literal(person, vocab::FOAF_GIVEN_NAME, given);
        }
        if let Some(family) = family {
            graph.insert_literal(person, vocab::FOAF_FAMILY_NAME, family);
        }

        match individual.sex() {
            Sex::Male => {
                graph.insert_literal(person, vocab::FOAF_GENDER, vocab::GENDER_MALE);
            }
            Sex::Female => {
                graph.insert_literal(person, vocab::FOAF_GENDER, vocab::GENDER_FEMALE);
            }
            Sex::Unknown => {
                if let Some(code) = &individual.sex {
                    tracing::warn!(
                        individual = %individual.xref,
                        code = %code,
                        "sex code has no gender mapping, omitting"
                    );
                }
            }
        }

        if let Some(birth) = &individual.birth {
            EventNode::for_principal(graph, vocab::BIO_BIRTH, person).attach(
                graph,
                birth,
                self.options,
            );
        }
        if let Some(death) = &individual.death {
            EventNode::for_principal(graph, vocab::BIO_DEATH, person).attach(
                graph,
                death,
                self.options,
            );
        }

        if let Some(note) = &individual.note {
            graph.insert_literal(person, vocab::RDFS_COMMENT, &note.text());
        }
        if let Some(title) = &individual.title {
            graph.insert_literal(person, vocab::FOAF_TITLE, title);
        }
    }

    /// Every pointer in the file must name a record that exists.
    fn check_links(&self) -> Result<()> {
        for individual in &self.file.individuals {
            for famc in &individual.famc {
                self.family(famc, &individual.xref)?;
            }
            for fams in &individual.fams {
                self.family(fams, &individual.xref)?;
            }
        }
        for family in &self.file.families {
            for member in family.partners().chain(family.children.iter()) {
                self.person(member, &family.xref)?;
            }
        }
        Ok(())
    }

    fn map_parentage(&mut self) -> Result<()> {
        let file = self.file;
        let mut edges = 0usize;
        for individual in &file.individuals {
            let (father, mother) = file.parents_of(individual);
            if father.is_none() && mother.is_none() {
                continue;
            }
            let child = self.person(&individual.xref, &individual.xref)?;
            if let Some(father) = father {
                let father = self.person(father, &individual.xref)?;
                self.graph.insert(child, vocab::BIO_FATHER, father);
                edges += 1;
            }
            if let Some(mother) = mother {
                let mother = self.person(mother, &individual.xref)?;
                self.graph.insert(child, vocab::BIO_MOTHER, mother);
                edges += 1;
            }
        }
        tracing::debug!(edges, "parentage pass done");
        Ok(())
    }

    fn map_marriages(&mut self) -> Result<()> {
        let file = self.file;
        for family in &file.families {
            let Some(detail) = &family.marriage else {
                continue;
            };
            let partners = family
                .partners()
                .map(|xref| self.person(xref, &family.xref))
                .collect::<Result<Vec<NodeId>>>()?;

            let Some(event) = EventNode::for_partners(&mut self.graph, &partners) else {
                tracing::warn!(family = %family.xref, "marriage without partners, skipping");
                continue;
            };
            event.attach(&mut self.graph, detail, self.options);
            self.marriages.register(family.xref.clone(), event.node)?;
        }
        tracing::debug!(marriages = self.marriages.len(), "marriage pass done");
        Ok(())
    }
}
