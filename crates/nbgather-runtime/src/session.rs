use std::sync::Arc;

use nbgather_engine::{
    count_gathered, map_fragments_to_units, reassemble, to_notebook, to_script, GatherStats,
};
use nbgather_resolver::{DependencyResolver, ResolverFactory};
use nbgather_types::{GatherOutcome, LiveUnit, LoggedUnit, SelectionRange, SessionId, Slice};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use crate::report::{CompletionKind, GatherReport, ReportSink};
use crate::{GatherConfig, GatherError, Result, SessionLog};

/// Outcome of the resolve step shared by gather and smart-select.
enum SliceAttempt {
    /// No working resolver for this session (failed init or wrong
    /// language); a non-fatal, reportable condition.
    Unavailable,
    Resolved {
        slice: Slice,
        lines_submitted: usize,
        cells_submitted: usize,
    },
}

/// One live document/kernel pairing, tracked independently of every
/// other session.
///
/// Owns the session's execution log for as long as the session is
/// open. The resolver is prepared exactly once, asynchronously; every
/// public operation awaits that initialization before touching shared
/// state, so a slow init racing an early call never observes a
/// half-built session. A failed init is cached: later calls see
/// "unavailable" instead of failing again until the session is
/// reopened.
pub struct GatherSession {
    id: SessionId,
    config: GatherConfig,
    /// Language capability, decided once at session open. The language
    /// tag is fixed for the session's lifetime, so this is never
    /// re-checked per call.
    supported: bool,
    factory: Arc<dyn ResolverFactory>,
    sink: Arc<dyn ReportSink>,
    log: Mutex<SessionLog>,
    resolver: OnceCell<Option<Arc<dyn DependencyResolver>>>,
}

impl GatherSession {
    pub fn new(
        id: SessionId,
        language: &str,
        config: GatherConfig,
        factory: Arc<dyn ResolverFactory>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        let supported = language.eq_ignore_ascii_case(&config.language);
        Self {
            id,
            config,
            supported,
            factory,
            sink,
            log: Mutex::new(SessionLog::new()),
            resolver: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Await the session's one-time initialization. Idempotent.
    pub async fn ready(&self) {
        let _ = self.resolver_handle().await;
    }

    async fn resolver_handle(&self) -> Option<Arc<dyn DependencyResolver>> {
        self.resolver
            .get_or_init(|| async {
                if !self.supported {
                    debug!(session = %self.id, "language not supported, session degraded");
                    return None;
                }
                match self.factory.create(&self.config.language).await {
                    Ok(resolver) => Some(resolver),
                    Err(err) => {
                        warn!(session = %self.id, error = %err, "resolver initialization failed");
                        self.sink.report(GatherReport::Failure {
                            operation: "init",
                            message: err.to_string(),
                        });
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Record one executed unit in the session log.
    ///
    /// An execution order equal to the configured first value is taken
    /// as an implicit kernel restart and clears the log before the
    /// append (best-effort recovery, see [`GatherConfig`]). A unit
    /// that fails normalization is reported and returned as an error
    /// without touching the log.
    pub async fn log_execution(&self, unit: &LiveUnit) -> Result<()> {
        if !self.supported {
            return Ok(());
        }
        self.ready().await;

        let logged = match LoggedUnit::from_live(unit) {
            Ok(logged) => logged,
            Err(err) => {
                let err = GatherError::from(err);
                self.sink.report(GatherReport::Failure {
                    operation: "log",
                    message: err.to_string(),
                });
                return Err(err);
            }
        };

        let mut log = self.log.lock().await;
        if self.config.reset_on_first_execution
            && logged.execution_order == Some(self.config.first_execution_order)
        {
            log.reset();
        }
        log.append(logged);
        Ok(())
    }

    /// Clear the log and its counters. Idempotent; clearing an empty
    /// log is a successful no-op.
    pub async fn reset_log(&self) {
        self.ready().await;
        self.log.lock().await.reset();
    }

    pub async fn log_len(&self) -> usize {
        self.ready().await;
        self.log.lock().await.len()
    }

    /// Reconstruct the minimal program that reproduces the state the
    /// target cell depends on.
    ///
    /// Resolves against the latest execution of the target's identity,
    /// reassembles the slice into marker-delimited text, and hands off
    /// to script or notebook reconstruction. Unavailable resolvers and
    /// empty slices are distinct non-fatal outcomes; resolution
    /// failures are reported and returned as errors.
    pub async fn gather_code(&self, target: &LiveUnit, to_script_doc: bool) -> Result<GatherOutcome> {
        let attempt = self.slice_target(target, "gather").await?;
        let SliceAttempt::Resolved {
            slice,
            lines_submitted,
            cells_submitted,
        } = attempt
        else {
            self.sink.report(GatherReport::Completed {
                result: CompletionKind::Unavailable,
            });
            return Ok(GatherOutcome::Unavailable);
        };

        if slice.is_empty() {
            self.sink.report(GatherReport::Completed {
                result: CompletionKind::Empty,
            });
            return Ok(GatherOutcome::NothingToGather);
        }

        let marked = reassemble(&slice.fragments, &self.config.marker_token);
        let marked = marked.trim();

        let (lines_gathered, cells_gathered) = count_gathered(marked, &self.config.marker_token);
        self.sink.report(GatherReport::Stats(GatherStats {
            lines_submitted,
            cells_submitted,
            lines_gathered,
            cells_gathered,
        }));

        let (document, result) = if to_script_doc {
            (
                to_script(marked, &self.config.marker_token, &self.config.cell_marker),
                CompletionKind::Script,
            )
        } else {
            (
                to_notebook(marked, &self.config.marker_token),
                CompletionKind::Notebook,
            )
        };
        self.sink.report(GatherReport::Completed { result });
        Ok(GatherOutcome::Document(document))
    }

    /// Compute the slice for the target and map its fragments back
    /// onto the live document as selection ranges.
    ///
    /// Matching runs against the live unit list, not the log; a
    /// fragment whose source cell was edited or removed since
    /// execution simply produces no range.
    pub async fn smart_select(
        &self,
        target: &LiveUnit,
        live_units: &[LiveUnit],
    ) -> Result<Vec<SelectionRange>> {
        let attempt = self.slice_target(target, "select").await?;
        let SliceAttempt::Resolved { slice, .. } = attempt else {
            self.sink.report(GatherReport::Completed {
                result: CompletionKind::Unavailable,
            });
            return Ok(Vec::new());
        };

        if slice.is_empty() {
            self.sink.report(GatherReport::Completed {
                result: CompletionKind::Empty,
            });
            return Ok(Vec::new());
        }

        Ok(map_fragments_to_units(&slice.fragments, live_units))
    }

    /// Gather when no live analysis log exists: replay the live
    /// document up to and including the target, gather, then reset.
    ///
    /// The reset is unconditional and runs on the error path too, so
    /// no replayed state leaks into later unrelated requests.
    pub async fn gather_without_kernel(
        &self,
        live_units: &[LiveUnit],
        target: &LiveUnit,
        to_script_doc: bool,
    ) -> Result<GatherOutcome> {
        let result = match self.replay(live_units, target).await {
            Ok(()) => self.gather_code(target, to_script_doc).await,
            Err(err) => Err(err),
        };
        self.reset_log().await;
        result
    }

    /// Smart-select counterpart of [`Self::gather_without_kernel`],
    /// with the same scoped cleanup guarantee.
    pub async fn smart_select_without_kernel(
        &self,
        live_units: &[LiveUnit],
        target: &LiveUnit,
    ) -> Result<Vec<SelectionRange>> {
        let result = match self.replay(live_units, target).await {
            Ok(()) => self.smart_select(target, live_units).await,
            Err(err) => Err(err),
        };
        self.reset_log().await;
        result
    }

    /// Replay live units into the log, in document order, stopping
    /// after the target. Blank cells are skipped the same way the
    /// execution path never logs them.
    async fn replay(&self, live_units: &[LiveUnit], target: &LiveUnit) -> Result<()> {
        for unit in live_units {
            if !unit.text.trim().is_empty() {
                self.log_execution(unit).await?;
            }
            if unit.persistent_id == target.persistent_id {
                break;
            }
        }
        Ok(())
    }

    async fn slice_target(&self, target: &LiveUnit, operation: &'static str) -> Result<SliceAttempt> {
        let Some(resolver) = self.resolver_handle().await else {
            return Ok(SliceAttempt::Unavailable);
        };

        let normalized = match LoggedUnit::from_live(target) {
            Ok(normalized) => normalized,
            Err(err) => {
                let err = GatherError::from(err);
                self.sink.report(GatherReport::Failure {
                    operation,
                    message: err.to_string(),
                });
                return Err(err);
            }
        };

        let log = self.log.lock().await;
        match resolver.resolve(log.entries(), &normalized.persistent_id) {
            Ok(Some(slice)) => Ok(SliceAttempt::Resolved {
                slice,
                lines_submitted: log.lines_submitted(),
                cells_submitted: log.cells_submitted(),
            }),
            Ok(None) => Ok(SliceAttempt::Unavailable),
            Err(err) => {
                let err = GatherError::from(err);
                self.sink.report(GatherReport::Failure {
                    operation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}
