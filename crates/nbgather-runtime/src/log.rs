use nbgather_engine::count_submitted_lines;
use nbgather_types::LoggedUnit;

/// Append-only execution log for one session, with the submitted-work
/// counters that reset alongside it.
///
/// Mutated only behind the session's lock, so appends and resets are
/// atomic as observed by any other caller: either the log and both
/// counters clear together, or none of them do.
#[derive(Debug, Default)]
pub struct SessionLog {
    entries: Vec<LoggedUnit>,
    lines_submitted: usize,
    cells_submitted: usize,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one executed unit. No deduplication: repeat executions
    /// of the same cell each get their own entry.
    pub fn append(&mut self, unit: LoggedUnit) {
        self.lines_submitted += count_submitted_lines(&unit.text);
        self.cells_submitted += 1;
        self.entries.push(unit);
    }

    /// Clear the log and counters. Idempotent; resetting an empty log
    /// is a successful no-op.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.lines_submitted = 0;
        self.cells_submitted = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LoggedUnit] {
        &self.entries
    }

    pub fn lines_submitted(&self) -> usize {
        self.lines_submitted
    }

    pub fn cells_submitted(&self) -> usize {
        self.cells_submitted
    }
}
