use std::sync::Mutex;

use nbgather_runtime::{CompletionKind, GatherReport, ReportSink};

/// Report sink that records everything for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<GatherReport>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<GatherReport> {
        self.reports.lock().expect("sink poisoned").clone()
    }

    /// Completion kinds in the order they were reported.
    pub fn completions(&self) -> Vec<CompletionKind> {
        self.reports()
            .into_iter()
            .filter_map(|report| match report {
                GatherReport::Completed { result } => Some(result),
                _ => None,
            })
            .collect()
    }

    /// Operations that reported a failure.
    pub fn failures(&self) -> Vec<&'static str> {
        self.reports()
            .into_iter()
            .filter_map(|report| match report {
                GatherReport::Failure { operation, .. } => Some(operation),
                _ => None,
            })
            .collect()
    }
}

impl ReportSink for RecordingSink {
    fn report(&self, report: GatherReport) {
        self.reports.lock().expect("sink poisoned").push(report);
    }
}
