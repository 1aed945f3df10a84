//! Integration tests for the complete gedrdf pipeline
//!
//! These tests drive text through every crate:
//! - GEDCOM text → record model → graph → Turtle / N-Triples
//! - Turtle / N-Triples → graph → record model → GEDCOM text
//!
//! Run with: cargo test --test integration_tests

use gedrdf_gedcom::{parse_gedcom, Xref};
use gedrdf_graph::{read_graph_file, vocab, RdfFormat};
use gedrdf_map::{gedcom_text_to_rdf, rdf_to_gedcom, rdf_to_gedcom_text, MapError, MapOptions};
use tempfile::tempdir;

const FAMILY: &str = "\
0 HEAD
1 GEDC
2 VERS 5.5
0 @I1@ INDI
1 NAME Bob /Cox/
1 SEX M
1 BIRT
2 DATE 3 MAR 1940
2 PLAC Leeds
1 FAMS @F1@
0 @I2@ INDI
1 NAME Joann /Para/
1 SEX F
1 NOTE Met Bob in 1960.
2 CONT Married in York.
1 FAMS @F1@
0 @I3@ INDI
1 NAME Bobby Jo /Cox/
1 SEX M
1 FAMC @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 MARR
2 DATE 1962
2 PLAC York
1 CHIL @I3@
0 TRLR
";

// ============================================================================
// Forward: GEDCOM → RDF text
// ============================================================================

#[test]
fn test_forward_turtle_carries_events_and_notes() {
    let turtle = gedcom_text_to_rdf(FAMILY, RdfFormat::Turtle, &MapOptions::default())
        .expect("forward");

    assert!(turtle.contains("a bio:Birth"));
    assert!(turtle.contains("bio:date \"3 MAR 1940\""));
    assert!(turtle.contains("dc:date \"3 MAR 1940\""));
    assert!(turtle.contains("bio:place \"Leeds\""));
    assert!(turtle.contains("rdfs:comment \"Met Bob in 1960.\\nMarried in York.\""));
    assert!(turtle.contains("bio:place \"York\""));
}

#[test]
fn test_forward_respects_dc_date_option() {
    let options = MapOptions::from_lookup(|key| {
        (key == gedrdf_map::options::DC_DATE_ENV).then(|| "0".to_string())
    });
    let turtle = gedcom_text_to_rdf(FAMILY, RdfFormat::Turtle, &options).expect("forward");
    assert!(turtle.contains("bio:date"));
    assert!(!turtle.contains("dc:date"));
}

// ============================================================================
// Round trip through files on disk
// ============================================================================

#[test]
fn test_round_trip_through_turtle_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("family.ttl");
    let options = MapOptions::default();

    let turtle = gedcom_text_to_rdf(FAMILY, RdfFormat::Turtle, &options).expect("forward");
    std::fs::write(&path, turtle).expect("write turtle");

    let graph = read_graph_file(&path).expect("read turtle");
    assert_eq!(graph.nodes_of_type(vocab::FOAF_PERSON).len(), 3);

    let out = rdf_to_gedcom(&graph, &options).expect("reverse");
    let original = parse_gedcom(FAMILY).expect("parse");
    assert_eq!(out.file.individuals.len(), original.individuals.len());

    let joann = out
        .file
        .individuals
        .iter()
        .find(|i| i.name_parts() == (Some("Joann"), Some("Para")))
        .expect("joann");
    let note = joann.note.as_ref().expect("note");
    assert_eq!(note.first, "Met Bob in 1960.");
    assert_eq!(note.continuations, vec!["Married in York.".to_string()]);

    let bob = out
        .file
        .individuals
        .iter()
        .find(|i| i.name_parts() == (Some("Bob"), Some("Cox")))
        .expect("bob");
    let birth = bob.birth.as_ref().expect("birth");
    assert_eq!(birth.date.as_deref(), Some("3 MAR 1940"));
    assert_eq!(birth.place.as_deref(), Some("Leeds"));

    let family = &out.file.families[0];
    assert_eq!(family.husband.as_ref(), Some(&bob.xref));
    assert_eq!(family.wife.as_ref(), Some(&joann.xref));
    assert_eq!(family.children.len(), 1);
}

#[test]
fn test_round_trip_through_ntriples_text() {
    let options = MapOptions::default();
    let nt = gedcom_text_to_rdf(FAMILY, RdfFormat::NTriples, &options).expect("forward");
    let gedcom = rdf_to_gedcom_text(nt.as_bytes(), RdfFormat::NTriples, &options).expect("reverse");

    let reparsed = parse_gedcom(&gedcom).expect("reparse");
    assert_eq!(reparsed, parse_gedcom(FAMILY).expect("parse"));
}

#[test]
fn test_reverse_without_parent_inference() {
    let options = MapOptions {
        infer_parentage: false,
        ..MapOptions::default()
    };
    let nt = gedcom_text_to_rdf(FAMILY, RdfFormat::NTriples, &options).expect("forward");
    let gedcom = rdf_to_gedcom_text(nt.as_bytes(), RdfFormat::NTriples, &options).expect("reverse");
    let reparsed = parse_gedcom(&gedcom).expect("reparse");

    assert!(reparsed.families[0].children.is_empty());
    let bobby_jo = reparsed.individual(&Xref::new("I3")).expect("I3");
    assert!(bobby_jo.famc.is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_malformed_gedcom_reports_line() {
    let err = gedcom_text_to_rdf("0 HEAD\nbogus\n", RdfFormat::Turtle, &MapOptions::default())
        .unwrap_err();
    assert!(matches!(err, MapError::Gedcom(_)));
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn test_malformed_turtle_is_a_graph_error() {
    let err = rdf_to_gedcom_text(b"this is not turtle", RdfFormat::Turtle, &MapOptions::default())
        .unwrap_err();
    assert!(matches!(err, MapError::Graph(_)));
}
