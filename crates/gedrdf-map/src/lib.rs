//! Bidirectional mapping between GEDCOM records and a FOAF/BIO triple graph.
//!
//! - [`gedcom_to_rdf`]: persons, parentage edges, then marriage events.
//! - [`rdf_to_gedcom`]: individuals from person nodes, then families from
//!   marriage nodes (with optional child inference).
//! - [`IdentityRegistry`]: the per-invocation correlation of record ids and
//!   graph nodes.
//!
//! Every transform is all-or-nothing: a [`MapError`] means no graph or file
//! was produced.

pub mod convert;
pub mod error;
pub mod forward;
pub mod options;
pub mod registry;
pub mod reverse;

pub use convert::{gedcom_text_to_rdf, rdf_to_gedcom_text, render_graph};
pub use error::{MapError, Result, StructureIssue};
pub use forward::{gedcom_to_rdf, ForwardOutput};
pub use options::MapOptions;
pub use registry::IdentityRegistry;
pub use reverse::{rdf_to_gedcom, ReverseOutput};
