//! Triple graph collaborator for gedrdf.
//!
//! - [`Graph`]: indexed in-memory triple set over opaque [`NodeId`] handles.
//! - [`query`]: declarative pattern queries returning row-wise bindings.
//! - [`vocab`]: the FOAF/BIO terms the genealogy mapping populates.
//! - [`write`] / [`read`]: Turtle and N-Triples output; Turtle, N-Triples and
//!   RDF/XML input (via Sophia).

pub mod error;
pub mod graph;
pub mod query;
pub mod read;
pub mod term;
pub mod vocab;
pub mod write;

pub use error::{GraphError, Result};
pub use graph::Graph;
pub use read::{read_graph, read_graph_file, RdfFormat};
pub use term::{Literal, NodeId, Term, Triple};
pub use write::{write_ntriples, write_turtle};
