//! GEDCOM text writer.

use crate::model::{EventDetail, Family, GedcomFile, Individual};
use std::fmt::Write as _;

fn line(out: &mut String, level: usize, tag: &str, value: Option<&str>) {
    match value {
        Some(v) if !v.is_empty() => {
            let _ = writeln!(out, "{level} {tag} {v}");
        }
        _ => {
            let _ = writeln!(out, "{level} {tag}");
        }
    }
}

fn event(out: &mut String, tag: &str, detail: &EventDetail) {
    line(out, 1, tag, None);
    if let Some(date) = &detail.date {
        line(out, 2, "DATE", Some(date));
    }
    if let Some(place) = &detail.place {
        line(out, 2, "PLAC", Some(place));
    }
}

fn individual(out: &mut String, ind: &Individual) {
    let _ = writeln!(out, "0 {} INDI", ind.xref);
    if let Some(name) = &ind.name {
        line(out, 1, "NAME", Some(&name.to_value()));
    }
    if let Some(sex) = &ind.sex {
        line(out, 1, "SEX", Some(sex));
    }
    if let Some(birth) = &ind.birth {
        event(out, "BIRT", birth);
    }
    if let Some(death) = &ind.death {
        event(out, "DEAT", death);
    }
    if let Some(title) = &ind.title {
        line(out, 1, "TITL", Some(title));
    }
    if let Some(note) = &ind.note {
        line(out, 1, "NOTE", Some(&note.first));
        for cont in &note.continuations {
            line(out, 2, "CONT", Some(cont));
        }
    }
    for famc in &ind.famc {
        line(out, 1, "FAMC", Some(&famc.to_string()));
    }
    for fams in &ind.fams {
        line(out, 1, "FAMS", Some(&fams.to_string()));
    }
}

fn family(out: &mut String, fam: &Family) {
    let _ = writeln!(out, "0 {} FAM", fam.xref);
    if let Some(husband) = &fam.husband {
        line(out, 1, "HUSB", Some(&husband.to_string()));
    }
    if let Some(wife) = &fam.wife {
        line(out, 1, "WIFE", Some(&wife.to_string()));
    }
    if let Some(marriage) = &fam.marriage {
        event(out, "MARR", marriage);
    }
    for child in &fam.children {
        line(out, 1, "CHIL", Some(&child.to_string()));
    }
}

/// Serialize a file, header and trailer included.
pub fn write_gedcom(file: &GedcomFile) -> String {
    let mut out = String::new();
    line(&mut out, 0, "HEAD", None);
    line(&mut out, 1, "SOUR", Some("gedrdf"));
    line(&mut out, 1, "GEDC", None);
    line(&mut out, 2, "VERS", Some("5.5"));
    line(&mut out, 2, "FORM", Some("LINEAGE-LINKED"));
    line(&mut out, 1, "CHAR", Some("UTF-8"));
    for ind in &file.individuals {
        individual(&mut out, ind);
    }
    for fam in &file.families {
        family(&mut out, fam);
    }
    line(&mut out, 0, "TRLR", None);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Name, Note, Xref};

    #[test]
    fn writes_individual_with_continuation_lines() {
        let mut ind = Individual::new(Xref::new("I1"));
        ind.name = Some(Name::parse("Bob /Cox/"));
        ind.sex = Some("M".to_string());
        ind.birth = Some(EventDetail {
            date: Some("1 JAN 1900".to_string()),
            place: None,
        });
        ind.note = Some(Note::from_text("Line 1\nLine 2"));
        ind.fams.push(Xref::new("F1"));
        let file = GedcomFile {
            individuals: vec![ind],
            families: Vec::new(),
        };

        let text = write_gedcom(&file);
        let expected_body = "\
0 @I1@ INDI
1 NAME Bob /Cox/
1 SEX M
1 BIRT
2 DATE 1 JAN 1900
1 NOTE Line 1
2 CONT Line 2
1 FAMS @F1@
0 TRLR
";
        assert!(text.starts_with("0 HEAD\n"));
        assert!(text.ends_with(expected_body), "{text}");
    }

    #[test]
    fn writes_family_links() {
        let mut fam = Family::new(Xref::new("F1"));
        fam.husband = Some(Xref::new("I1"));
        fam.wife = Some(Xref::new("I2"));
        fam.marriage = Some(EventDetail::default());
        fam.children.push(Xref::new("I3"));
        let file = GedcomFile {
            individuals: Vec::new(),
            families: vec![fam],
        };
        let text = write_gedcom(&file);
        assert!(text.contains("0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 MARR\n1 CHIL @I3@\n"));
    }
}
