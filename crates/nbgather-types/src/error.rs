use std::fmt;

/// Result type for nbgather-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A host-supplied unit could not be converted into a log record
    /// (missing identity, unreadable text, etc.)
    Normalization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Normalization(msg) => write!(f, "Normalization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
