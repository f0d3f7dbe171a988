use std::fmt;

use nbgather_types::SessionId;

/// Result type for nbgather-runtime operations
pub type Result<T> = std::result::Result<T, GatherError>;

/// Error taxonomy of the orchestration layer.
///
/// Every variant is caught at the orchestrator boundary, reported
/// through the session's [`crate::ReportSink`], and also returned to
/// the immediate caller; none of them crash a session.
#[derive(Debug)]
pub enum GatherError {
    /// Resolver/environment could not be prepared. The session stays
    /// degraded until reopened; later calls report "unavailable"
    /// instead of failing again.
    Initialization(String),

    /// A host-supplied unit could not be converted. Surfaced and then
    /// execution continues; one bad unit does not corrupt the log.
    Normalization(String),

    /// The resolver failed or returned no slice. Surfaced as a
    /// "could not analyze" result; never retried automatically.
    Resolution(String),

    /// Operation addressed a session identity with no live session.
    NoSession(SessionId),
}

impl fmt::Display for GatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatherError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
            GatherError::Normalization(msg) => write!(f, "Normalization error: {}", msg),
            GatherError::Resolution(msg) => write!(f, "Resolution error: {}", msg),
            GatherError::NoSession(id) => write!(f, "No session for identity: {}", id),
        }
    }
}

impl std::error::Error for GatherError {}

impl From<nbgather_types::Error> for GatherError {
    fn from(err: nbgather_types::Error) -> Self {
        GatherError::Normalization(err.to_string())
    }
}

impl From<nbgather_resolver::Error> for GatherError {
    fn from(err: nbgather_resolver::Error) -> Self {
        GatherError::Resolution(err.to_string())
    }
}
