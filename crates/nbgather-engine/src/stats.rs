use nbgather_types::count_nonblank_lines;
use serde::{Deserialize, Serialize};

/// Submitted-versus-gathered accounting for one gather request.
///
/// Reporting only; nothing downstream makes a correctness decision on
/// these numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatherStats {
    /// Non-blank lines logged since the last reset.
    pub lines_submitted: usize,
    /// Cells logged since the last reset.
    pub cells_submitted: usize,
    /// Non-blank, non-marker lines in the gathered result.
    pub lines_gathered: usize,
    /// Cells (marker lines) in the gathered result.
    pub cells_gathered: usize,
}

/// Count gathered lines and cells from marker-delimited slice text.
pub fn count_gathered(marked_text: &str, marker: &str) -> (usize, usize) {
    let cells = marked_text
        .lines()
        .filter(|line| line.starts_with(marker))
        .count();
    let lines = marked_text
        .lines()
        .filter(|line| !line.starts_with(marker))
        .filter(|line| !line.trim().is_empty())
        .count();
    (lines, cells)
}

/// Count submitted lines for one logged cell.
pub fn count_submitted_lines(text: &str) -> usize {
    count_nonblank_lines(text)
}
