//! Record extraction: tree → [`GedcomFile`].

use crate::error::GedcomError;
use crate::model::{EventDetail, Family, GedcomFile, Individual, Name, Note, Xref};
use crate::tree::{parse_tree, GedcomNode};

/// Parse GEDCOM text into individuals and families.
///
/// Records other than `INDI` and `FAM` (header, sources, trailer, ...) are
/// tokenized and checked for well-formedness but otherwise ignored, as are
/// unknown tags inside individual and family records.
pub fn parse_gedcom(text: &str) -> Result<GedcomFile, GedcomError> {
    let roots = parse_tree(text)?;
    let mut file = GedcomFile::default();

    for record in &roots {
        match record.tag.as_str() {
            "INDI" => file.individuals.push(individual_from(record)?),
            "FAM" => file.families.push(family_from(record)?),
            _ => {}
        }
    }

    tracing::debug!(
        individuals = file.individuals.len(),
        families = file.families.len(),
        "parsed GEDCOM records"
    );
    Ok(file)
}

fn record_xref(record: &GedcomNode) -> Result<Xref, GedcomError> {
    record
        .xref
        .as_deref()
        .map(Xref::new)
        .ok_or_else(|| GedcomError::MissingXref {
            line: record.line,
            tag: record.tag.clone(),
        })
}

fn pointer(node: &GedcomNode) -> Result<Xref, GedcomError> {
    let value = node.value.as_deref().unwrap_or("");
    Xref::from_pointer(value).ok_or_else(|| GedcomError::Line {
        line: node.line,
        message: format!("{} expects an @xref@ pointer, got `{value}`", node.tag),
    })
}

fn pointers(record: &GedcomNode, tag: &str) -> Result<Vec<Xref>, GedcomError> {
    record.children_with(tag).map(pointer).collect()
}

fn event_from(node: &GedcomNode) -> EventDetail {
    EventDetail {
        date: node.child_value("DATE").map(str::to_string),
        place: node.child_value("PLAC").map(str::to_string),
    }
}

fn note_from(node: &GedcomNode) -> Note {
    let mut note = Note {
        first: node.value.clone().unwrap_or_default(),
        continuations: Vec::new(),
    };
    for child in &node.children {
        let value = child.value.as_deref().unwrap_or("");
        match child.tag.as_str() {
            "CONT" => note.continuations.push(value.to_string()),
            "CONC" => match note.continuations.last_mut() {
                Some(last) => last.push_str(value),
                None => note.first.push_str(value),
            },
            _ => {}
        }
    }
    note
}

fn individual_from(record: &GedcomNode) -> Result<Individual, GedcomError> {
    let mut individual = Individual::new(record_xref(record)?);
    individual.name = record.child_value("NAME").map(Name::parse);
    individual.sex = record.child_value("SEX").map(|s| s.trim().to_string());
    individual.birth = record.child("BIRT").map(event_from);
    individual.death = record.child("DEAT").map(event_from);
    individual.note = record.child("NOTE").map(note_from);
    individual.title = record.child_value("TITL").map(str::to_string);
    individual.famc = pointers(record, "FAMC")?;
    individual.fams = pointers(record, "FAMS")?;
    Ok(individual)
}

fn family_from(record: &GedcomNode) -> Result<Family, GedcomError> {
    let mut family = Family::new(record_xref(record)?);
    family.husband = record.child("HUSB").map(pointer).transpose()?;
    family.wife = record.child("WIFE").map(pointer).transpose()?;
    family.marriage = record.child("MARR").map(event_from);
    family.children = pointers(record, "CHIL")?;
    Ok(family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sex;

    #[test]
    fn extracts_individual_fields() {
        let text = "\
0 @I1@ INDI
1 NAME Anna /Berg/
1 SEX f
1 BIRT
2 DATE 3 MAR 1850
1 DEAT
2 PLAC Bergen
1 TITL Baroness
1 NOTE First line
2 CONT Second line
2 CONC , continued
1 FAMS @F1@
0 TRLR
";
        let file = parse_gedcom(text).unwrap();
        let anna = &file.individuals[0];
        assert_eq!(anna.xref, Xref::new("I1"));
        assert_eq!(anna.name_parts(), (Some("Anna"), Some("Berg")));
        assert_eq!(anna.sex(), Sex::Female);
        let birth = anna.birth.as_ref().unwrap();
        assert_eq!(birth.date.as_deref(), Some("3 MAR 1850"));
        assert_eq!(birth.place, None);
        let death = anna.death.as_ref().unwrap();
        assert_eq!(death.date, None);
        assert_eq!(death.place.as_deref(), Some("Bergen"));
        assert_eq!(anna.title.as_deref(), Some("Baroness"));
        assert_eq!(
            anna.note.as_ref().unwrap().text(),
            "First line\nSecond line, continued"
        );
        assert_eq!(anna.fams, vec![Xref::new("F1")]);
    }

    #[test]
    fn bare_event_tag_is_present_but_empty() {
        let file = parse_gedcom("0 @I1@ INDI\n1 BIRT\n").unwrap();
        assert_eq!(file.individuals[0].birth, Some(EventDetail::default()));
        assert_eq!(file.individuals[0].death, None);
    }

    #[test]
    fn extracts_family_fields() {
        let text = "\
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 MARR
2 DATE 1 JUN 1970
1 CHIL @I3@
1 CHIL @I4@
";
        let file = parse_gedcom(text).unwrap();
        let family = &file.families[0];
        assert_eq!(family.husband, Some(Xref::new("I1")));
        assert_eq!(family.wife, Some(Xref::new("I2")));
        assert!(family.has_marriage());
        assert_eq!(
            family.marriage.as_ref().unwrap().date.as_deref(),
            Some("1 JUN 1970")
        );
        assert_eq!(family.children, vec![Xref::new("I3"), Xref::new("I4")]);
    }

    #[test]
    fn family_without_marr_has_no_marriage() {
        let file = parse_gedcom("0 @F1@ FAM\n1 HUSB @I1@\n").unwrap();
        assert!(!file.families[0].has_marriage());
    }

    #[test]
    fn rejects_record_without_xref() {
        let err = parse_gedcom("0 INDI\n1 NAME X\n").unwrap_err();
        assert!(matches!(err, GedcomError::MissingXref { line: 1, .. }), "{err}");
    }

    #[test]
    fn rejects_non_pointer_family_links() {
        let err = parse_gedcom("0 @F1@ FAM\n1 HUSB I1\n").unwrap_err();
        assert!(matches!(err, GedcomError::Line { line: 2, .. }), "{err}");
    }
}
