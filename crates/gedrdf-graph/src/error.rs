#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse {format}: {message}")]
    Parse { format: &'static str, message: String },
    #[error("failed to serialize {format}: {message}")]
    Serialize { format: &'static str, message: String },
    #[error("unsupported RDF term form: {0}")]
    Term(String),
    #[error("unsupported RDF format: .{0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
