//! GEDCOM record-format collaborator for gedrdf.
//!
//! - [`tree`]: nom line tokenizer and level-based tree builder.
//! - [`model`]: individuals and families with explicit optional fields.
//! - [`parse_gedcom`] / [`write_gedcom`]: text ↔ model.
//!
//! Tags covered: `NAME`, `SEX`, `BIRT`, `DEAT`, `NOTE`
//! (with `CONT`/`CONC`), `TITL`, `FAMC`, `FAMS` on individuals and `HUSB`,
//! `WIFE`, `MARR`, `CHIL` on families.

pub mod error;
pub mod model;
pub mod parse;
pub mod tree;
pub mod write;

pub use error::GedcomError;
pub use model::{EventDetail, Family, GedcomFile, Individual, Name, Note, Sex, Xref};
pub use parse::parse_gedcom;
pub use write::write_gedcom;
