use thiserror::Error;

#[derive(Debug, Error)]
pub enum GedcomError {
    #[error("parse error on line {line}: {message}")]
    Line { line: usize, message: String },
    #[error("{tag} record on line {line} has no @xref@")]
    MissingXref { line: usize, tag: String },
}
