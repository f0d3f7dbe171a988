use std::fmt;

/// Result type for nbgather-resolver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the resolver layer
#[derive(Debug)]
pub enum Error {
    /// The resolver could not produce a slice for the target
    Resolution(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Resolution(msg) => write!(f, "Resolution error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
