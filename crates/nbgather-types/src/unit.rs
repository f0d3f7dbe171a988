use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Stable cell identity assigned by the host document.
///
/// Stable for a given cell across edits, but the host may reuse it
/// (e.g., when a cell is deleted and its identity recycled). Repeat
/// executions of the same cell therefore share a `CellId` and are told
/// apart by [`LogEventId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique id minted once per log call, never reused.
///
/// Exists so a dependency resolver can distinguish two executions of
/// the same cell inside one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEventId(Uuid);

impl LogEventId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Session identity, derived from the host document's address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host view of an executable cell, as supplied by the editor/session
/// manager at execution time or read from the live document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveUnit {
    /// Stable host identity.
    pub persistent_id: CellId,
    /// Full cell text.
    pub text: String,
    /// Monotonically increasing execution counter, absent before the
    /// cell has ever run.
    pub execution_order: Option<i64>,
    /// Whether the execution ended in an error.
    pub has_error: bool,
}

impl LiveUnit {
    pub fn new(persistent_id: CellId, text: impl Into<String>) -> Self {
        Self {
            persistent_id,
            text: text.into(),
            execution_order: None,
            has_error: false,
        }
    }

    pub fn with_execution_order(mut self, order: i64) -> Self {
        self.execution_order = Some(order);
        self
    }

    pub fn with_error(mut self) -> Self {
        self.has_error = true;
        self
    }
}

/// One executed unit as recorded in a session log.
///
/// Created by normalization at each execution event; appended to the
/// log and never mutated afterwards. Deleted only by a full reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedUnit {
    pub persistent_id: CellId,
    pub text: String,
    pub execution_order: Option<i64>,
    pub has_error: bool,
    /// Minted fresh at log time; unique per log call.
    pub log_event_id: LogEventId,
}

impl LoggedUnit {
    /// Normalize a host cell into the canonical log record, minting a
    /// fresh [`LogEventId`].
    ///
    /// A cell whose text cannot be read (empty here, since the host
    /// hands over owned text) is rejected rather than logged; one bad
    /// unit must not corrupt the log.
    pub fn from_live(unit: &LiveUnit) -> Result<Self> {
        if unit.text.trim().is_empty() {
            return Err(Error::Normalization(format!(
                "cell {} has no readable text",
                unit.persistent_id
            )));
        }

        Ok(Self {
            persistent_id: unit.persistent_id.clone(),
            text: unit.text.clone(),
            execution_order: unit.execution_order,
            has_error: unit.has_error,
            log_event_id: LogEventId::generate(),
        })
    }
}
