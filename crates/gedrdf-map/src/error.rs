//! Fatal mapping conditions.
//!
//! Absent fields never reach this module: they are resolved where they are
//! detected by omitting the corresponding output. Everything here aborts the
//! whole transform. Collaborator failures (unparseable input) are wrapped
//! as-is.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("duplicate id {id}: already registered in this transform")]
    DuplicateId { id: String },

    #[error("dangling reference: {referrer} refers to {id}, which is not present")]
    DanglingReference { id: String, referrer: String },

    #[error("unrecognized sex value `{value}` on person {node} (expected `male` or `female`)")]
    UnrecognizedSex { node: String, value: String },

    #[error("{field} on {node} spans several lines, which a record field cannot hold: {value:?}")]
    LineBreakInValue {
        node: String,
        field: &'static str,
        value: String,
    },

    #[error("unsupported structure at {node}: {issue}")]
    UnsupportedStructure { node: String, issue: StructureIssue },

    #[error(transparent)]
    Gedcom(#[from] gedrdf_gedcom::GedcomError),

    #[error(transparent)]
    Graph(#[from] gedrdf_graph::GraphError),
}

/// Why a relationship shape cannot be expressed as a record-format family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureIssue {
    #[error("marriage has {0} partners, exactly two are required")]
    PartnerCount(usize),

    #[error("both marriage partners are {0}")]
    SameGender(&'static str),

    #[error("marriage partner {partner} has unrecognized gender `{value}`")]
    UnrecognizedPartnerGender { partner: String, value: String },

    #[error("marriage partner {partner} has no gender")]
    MissingPartnerGender { partner: String },

    #[error("parents share {0} marriages, the family of origin is ambiguous")]
    AmbiguousParentFamily(usize),
}

pub type Result<T> = std::result::Result<T, MapError>;
