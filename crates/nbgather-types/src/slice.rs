use serde::{Deserialize, Serialize};

use crate::CellId;

/// One contiguous piece of program text within a slice.
///
/// Fragment texts are newline-trimmed at the end; interior blank lines
/// are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    /// Cell the text originated from. Resolver output carries the
    /// origin; fragments recovered by re-segmenting marker-delimited
    /// text do not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<CellId>,
}

impl Fragment {
    pub fn new(text: impl Into<String>, origin: CellId) -> Self {
        Self {
            text: text.into(),
            origin: Some(origin),
        }
    }

    pub fn anonymous(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: None,
        }
    }
}

/// Backward-dependency result for a target cell against a log.
///
/// Fragment order is the resolver's order and is authoritative; nothing
/// downstream re-sorts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slice {
    pub target: CellId,
    pub fragments: Vec<Fragment>,
}

impl Slice {
    pub fn new(target: CellId, fragments: Vec<Fragment>) -> Self {
        Self { target, fragments }
    }

    pub fn empty(target: CellId) -> Self {
        Self {
            target,
            fragments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(|f| f.text.trim().is_empty())
    }
}
