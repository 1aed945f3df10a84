//! Vocabulary used by the genealogy graph.
//!
//! Two namespaces carry the data: FOAF for persons and BIO for biographical
//! events and family relations. `rdf:type`, `rdfs:comment`, and `dc:date` are
//! the only terms borrowed from elsewhere.

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const FOAF_NS: &str = "http://xmlns.com/foaf/0.1/";
pub const BIO_NS: &str = "http://purl.org/vocab/bio/0.1/";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

pub const FOAF_PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
pub const FOAF_GIVEN_NAME: &str = "http://xmlns.com/foaf/0.1/givenName";
pub const FOAF_FAMILY_NAME: &str = "http://xmlns.com/foaf/0.1/familyName";
pub const FOAF_GENDER: &str = "http://xmlns.com/foaf/0.1/gender";
pub const FOAF_TITLE: &str = "http://xmlns.com/foaf/0.1/title";

pub const BIO_BIRTH: &str = "http://purl.org/vocab/bio/0.1/Birth";
pub const BIO_DEATH: &str = "http://purl.org/vocab/bio/0.1/Death";
pub const BIO_MARRIAGE: &str = "http://purl.org/vocab/bio/0.1/Marriage";
pub const BIO_PRINCIPAL: &str = "http://purl.org/vocab/bio/0.1/principal";
pub const BIO_PARTNER: &str = "http://purl.org/vocab/bio/0.1/partner";
pub const BIO_DATE: &str = "http://purl.org/vocab/bio/0.1/date";
pub const BIO_PLACE: &str = "http://purl.org/vocab/bio/0.1/place";
pub const BIO_FATHER: &str = "http://purl.org/vocab/bio/0.1/father";
pub const BIO_MOTHER: &str = "http://purl.org/vocab/bio/0.1/mother";

pub const DC_DATE: &str = "http://purl.org/dc/elements/1.1/date";

/// `foaf:gender` literal values.
pub const GENDER_MALE: &str = "male";
pub const GENDER_FEMALE: &str = "female";

/// Prefixes emitted by the Turtle writer, in output order.
pub const PREFIXES: &[(&str, &str)] = &[
    ("bio", BIO_NS),
    ("dc", DC_NS),
    ("foaf", FOAF_NS),
    ("rdf", RDF_NS),
    ("rdfs", RDFS_NS),
];
