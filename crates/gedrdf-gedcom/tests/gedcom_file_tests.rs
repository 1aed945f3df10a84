use gedrdf_gedcom::{parse_gedcom, write_gedcom, Individual, Note, Sex, Xref};
use proptest::prelude::*;

// Sample GEDCOM file from Wikipedia.
const SAMPLE: &str = "
0 HEAD
1 SOUR Reunion
2 VERS V8.0
2 CORP Leister Productions
1 DEST Reunion
1 DATE 11 FEB 2006
1 FILE test
1 GEDC
2 VERS 5.5
1 CHAR MACINTOSH
0 @I1@ INDI
1 NAME Bob /Cox/
1 SEX M
1 FAMS @F1@
1 CHAN
2 DATE 11 FEB 2006
0 @I2@ INDI
1 NAME Joann /Para/
1 SEX F
1 FAMS @F1@
1 CHAN
2 DATE 11 FEB 2006
0 @I3@ INDI
1 NAME Bobby Jo /Cox/
1 SEX M
1 FAMC @F1@
1 CHAN
2 DATE 11 FEB 2006
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 MARR
1 CHIL @I3@
0 TRLR
";

#[test]
fn parses_sample_family() {
    let file = parse_gedcom(SAMPLE).expect("parse");
    assert_eq!(file.individuals.len(), 3);
    assert_eq!(file.families.len(), 1);

    let bobby = file.individual(&Xref::new("I3")).expect("I3");
    assert_eq!(bobby.name_parts(), (Some("Bobby Jo"), Some("Cox")));
    assert_eq!(bobby.sex(), Sex::Male);
    assert_eq!(
        file.parents_of(bobby),
        (Some(&Xref::new("I1")), Some(&Xref::new("I2")))
    );

    let family = &file.families[0];
    assert!(family.has_marriage());
    assert_eq!(family.partners().count(), 2);
}

#[test]
fn written_file_parses_back_to_same_model() {
    let file = parse_gedcom(SAMPLE).expect("parse");
    let text = write_gedcom(&file);
    let reparsed = parse_gedcom(&text).expect("reparse");
    assert_eq!(reparsed, file);
}

fn note_line() -> impl Strategy<Value = String> {
    // GEDCOM values cannot carry line breaks; leading spaces are significant.
    proptest::string::string_regex("[A-Za-z0-9 ,.'-]{0,20}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn notes_survive_write_and_parse(first in note_line(), rest in proptest::collection::vec(note_line(), 0..4)) {
        let mut ind = Individual::new(Xref::new("I1"));
        ind.note = Some(Note { first, continuations: rest });
        let file = gedrdf_gedcom::GedcomFile { individuals: vec![ind], families: Vec::new() };

        let reparsed = parse_gedcom(&write_gedcom(&file)).expect("reparse");
        prop_assert_eq!(&reparsed.individuals[0].note, &file.individuals[0].note);
    }
}
