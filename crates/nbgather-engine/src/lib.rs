// Engine module - pure transforms between slices, marker-delimited
// text, reconstructed documents, and live-document selections.
// This layer sits between the resolver's output and the orchestrator.

pub mod document;
pub mod select;
pub mod stats;
pub mod text;

pub use document::{to_notebook, to_script, unavailable_document};
pub use select::map_fragments_to_units;
pub use stats::{count_gathered, count_submitted_lines, GatherStats};
pub use text::{reassemble, segment};

/// Internal marker token kept between slice fragments when they are
/// flattened into one text blob. Rewritten to the host's configured
/// cell marker on script reconstruction, removed on notebook
/// reconstruction.
pub const DEFAULT_MARKER: &str = "#%%";

/// Cell marker the host shows in flat scripts when it has no
/// configured preference of its own.
pub const DEFAULT_CELL_MARKER: &str = "# %%";
