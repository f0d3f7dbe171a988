use nbgather_engine::GatherStats;
use tracing::{debug, warn};

/// How a gather request ended, in reporting vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Script,
    Notebook,
    Unavailable,
    Empty,
    Err,
}

impl CompletionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionKind::Script => "script",
            CompletionKind::Notebook => "notebook",
            CompletionKind::Unavailable => "unavailable",
            CompletionKind::Empty => "empty",
            CompletionKind::Err => "err",
        }
    }
}

/// Side-channel reports emitted by the orchestrator.
///
/// Failures reach the caller through `Result` as well; this channel is
/// for observers (status bars, quality reporting) that are not the
/// immediate caller.
#[derive(Debug, Clone)]
pub enum GatherReport {
    Completed { result: CompletionKind },
    Stats(GatherStats),
    Failure { operation: &'static str, message: String },
}

/// Receiver for side-channel reports.
pub trait ReportSink: Send + Sync {
    fn report(&self, report: GatherReport);
}

/// Default sink: forwards reports to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, report: GatherReport) {
        match report {
            GatherReport::Completed { result } => {
                debug!(result = result.as_str(), "gather completed");
            }
            GatherReport::Stats(stats) => {
                debug!(
                    lines_submitted = stats.lines_submitted,
                    cells_submitted = stats.cells_submitted,
                    lines_gathered = stats.lines_gathered,
                    cells_gathered = stats.cells_gathered,
                    "gather stats"
                );
            }
            GatherReport::Failure { operation, message } => {
                warn!(operation, %message, "gather failure");
            }
        }
    }
}
