use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nbgather_engine::unavailable_document;
use nbgather_resolver::ResolverFactory;
use nbgather_types::{
    GatherOutcome, LiveUnit, ReconstructedDocument, SelectionRange, SessionId,
};
use tracing::debug;

use crate::report::{ReportSink, TracingSink};
use crate::{GatherConfig, GatherError, GatherSession, Result};

/// Arena of live sessions, keyed by stable session identity.
///
/// The map is the only cross-session shared state: it is touched by
/// insert-on-open and remove-on-close, and for the same identity the
/// last writer wins. Sessions themselves are fully independent and
/// proceed concurrently.
pub struct GatherProvider {
    config: GatherConfig,
    factory: Arc<dyn ResolverFactory>,
    sink: Arc<dyn ReportSink>,
    sessions: Mutex<HashMap<SessionId, Arc<GatherSession>>>,
}

impl GatherProvider {
    pub fn new(config: GatherConfig, factory: Arc<dyn ResolverFactory>) -> Self {
        Self::with_sink(config, factory, Arc::new(TracingSink))
    }

    pub fn with_sink(
        config: GatherConfig,
        factory: Arc<dyn ResolverFactory>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            config,
            factory,
            sink,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Open a session for a document, kicking off its one-time resolver
    /// initialization in the background when a runtime is available.
    /// Reopening an identity replaces the previous session wholesale;
    /// no state is merged.
    pub fn open_session(&self, id: SessionId, language: &str) -> Arc<GatherSession> {
        let session = Arc::new(GatherSession::new(
            id.clone(),
            language,
            self.config.clone(),
            Arc::clone(&self.factory),
            Arc::clone(&self.sink),
        ));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let warm = Arc::clone(&session);
            handle.spawn(async move { warm.ready().await });
        }

        let mut sessions = self.sessions.lock().expect("session map poisoned");
        if sessions.insert(id.clone(), Arc::clone(&session)).is_some() {
            debug!(session = %id, "replaced existing session");
        }
        session
    }

    /// Remove a session from the map. Terminal: a closed identity must
    /// be reopened before it is usable again.
    pub fn close_session(&self, id: &SessionId) -> bool {
        self.sessions
            .lock()
            .expect("session map poisoned")
            .remove(id)
            .is_some()
    }

    pub fn session(&self, id: &SessionId) -> Option<Arc<GatherSession>> {
        self.sessions
            .lock()
            .expect("session map poisoned")
            .get(id)
            .cloned()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().expect("session map poisoned").len()
    }

    /// Materialize the "not available" sentinel for display, in the
    /// host's configured cell-marker dialect.
    pub fn sentinel_document(&self, to_script: bool) -> ReconstructedDocument {
        unavailable_document(to_script, &self.config.cell_marker)
    }

    // --- Per-session pass-through operations ---
    //
    // Addressing a closed or never-opened identity yields
    // GatherError::NoSession, the reportable "unavailable" signal; it
    // never panics and never creates a session implicitly.

    pub async fn log_execution(&self, id: &SessionId, unit: &LiveUnit) -> Result<()> {
        self.require(id)?.log_execution(unit).await
    }

    pub async fn reset_log(&self, id: &SessionId) -> Result<()> {
        self.require(id)?.reset_log().await;
        Ok(())
    }

    pub async fn log_len(&self, id: &SessionId) -> Result<usize> {
        Ok(self.require(id)?.log_len().await)
    }

    pub async fn gather_code(
        &self,
        id: &SessionId,
        target: &LiveUnit,
        to_script: bool,
    ) -> Result<GatherOutcome> {
        self.require(id)?.gather_code(target, to_script).await
    }

    pub async fn smart_select(
        &self,
        id: &SessionId,
        target: &LiveUnit,
        live_units: &[LiveUnit],
    ) -> Result<Vec<SelectionRange>> {
        self.require(id)?.smart_select(target, live_units).await
    }

    pub async fn gather_without_kernel(
        &self,
        id: &SessionId,
        live_units: &[LiveUnit],
        target: &LiveUnit,
        to_script: bool,
    ) -> Result<GatherOutcome> {
        self.require(id)?
            .gather_without_kernel(live_units, target, to_script)
            .await
    }

    pub async fn smart_select_without_kernel(
        &self,
        id: &SessionId,
        live_units: &[LiveUnit],
        target: &LiveUnit,
    ) -> Result<Vec<SelectionRange>> {
        self.require(id)?
            .smart_select_without_kernel(live_units, target)
            .await
    }

    fn require(&self, id: &SessionId) -> Result<Arc<GatherSession>> {
        self.session(id)
            .ok_or_else(|| GatherError::NoSession(id.clone()))
    }
}
