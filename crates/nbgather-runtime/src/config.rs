use serde::{Deserialize, Serialize};

/// Orchestrator configuration, fixed per provider instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatherConfig {
    /// Internal marker token delimiting slice fragments while they are
    /// flattened into one text blob.
    #[serde(default = "default_marker_token")]
    pub marker_token: String,

    /// Cell marker the host wants in reconstructed flat scripts.
    #[serde(default = "default_cell_marker")]
    pub cell_marker: String,

    /// The one scripting language this provider analyzes. Sessions
    /// opened for any other language are degraded from the start.
    #[serde(default = "default_language")]
    pub language: String,

    /// Treat `execution_order == first_execution_order` as an implicit
    /// kernel-restart signal and clear the log before appending.
    ///
    /// Best-effort recovery for hosts that never send an explicit
    /// restart event. A host that restarts its numbering without an
    /// actual restart will false-positive here, so this stays a
    /// toggleable heuristic rather than a hard invariant.
    #[serde(default = "default_true")]
    pub reset_on_first_execution: bool,

    /// The execution order value a fresh run starts at.
    #[serde(default = "default_first_execution_order")]
    pub first_execution_order: i64,
}

fn default_marker_token() -> String {
    nbgather_engine::DEFAULT_MARKER.to_string()
}

fn default_cell_marker() -> String {
    nbgather_engine::DEFAULT_CELL_MARKER.to_string()
}

fn default_language() -> String {
    "python".to_string()
}

fn default_true() -> bool {
    true
}

fn default_first_execution_order() -> i64 {
    1
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            marker_token: default_marker_token(),
            cell_marker: default_cell_marker(),
            language: default_language(),
            reset_on_first_execution: true,
            first_execution_order: default_first_execution_order(),
        }
    }
}
