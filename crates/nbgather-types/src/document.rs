use serde::{Deserialize, Serialize};

/// Kind of a reconstructed notebook unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Code,
    Markdown,
}

/// One cell of a reconstructed notebook document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookUnit {
    pub source_lines: Vec<String>,
    pub kind: UnitKind,
}

impl NotebookUnit {
    pub fn code(source_lines: Vec<String>) -> Self {
        Self {
            source_lines,
            kind: UnitKind::Code,
        }
    }

    pub fn markdown(source_lines: Vec<String>) -> Self {
        Self {
            source_lines,
            kind: UnitKind::Markdown,
        }
    }
}

/// Deterministic reconstruction of a slice, in the shape the host
/// asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconstructedDocument {
    /// Flat script; slice fragments joined with the host's configured
    /// cell marker.
    Script(String),
    /// Structured notebook; one unit per slice fragment.
    Notebook(Vec<NotebookUnit>),
}

/// Outcome of a gather request.
///
/// `NothingToGather` and `Unavailable` are distinct, non-fatal,
/// user-visible outcomes, not errors: the resolver ran and produced an
/// empty slice, or the session never got a working resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatherOutcome {
    Document(ReconstructedDocument),
    NothingToGather,
    Unavailable,
}

impl GatherOutcome {
    pub fn document(&self) -> Option<&ReconstructedDocument> {
        match self {
            GatherOutcome::Document(doc) => Some(doc),
            _ => None,
        }
    }
}

/// Half-open range of unit indices against the live document's current
/// ordering (not the log).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            end: index + 1,
        }
    }
}
