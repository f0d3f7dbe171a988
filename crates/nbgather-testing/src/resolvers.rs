use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use nbgather_resolver::{
    latest_execution, DependencyResolver, Error, ResolverFactory, Result,
};
use nbgather_types::{CellId, Fragment, LoggedUnit, Slice};

/// Resolver with pre-programmed slices per target.
///
/// A target that never ran against the log resolves to "unavailable";
/// a target in the log without a programmed slice resolves to an empty
/// slice.
#[derive(Default)]
pub struct ScriptedResolver {
    slices: HashMap<CellId, Vec<Fragment>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slice(mut self, target: CellId, fragments: Vec<Fragment>) -> Self {
        self.slices.insert(target, fragments);
        self
    }
}

impl DependencyResolver for ScriptedResolver {
    fn resolve(&self, log: &[LoggedUnit], target: &CellId) -> Result<Option<Slice>> {
        if latest_execution(log, target).is_none() {
            return Ok(None);
        }
        match self.slices.get(target) {
            Some(fragments) => Ok(Some(Slice::new(target.clone(), fragments.clone()))),
            None => Ok(Some(Slice::empty(target.clone()))),
        }
    }
}

/// Resolver that always produces an empty slice.
#[derive(Debug, Default)]
pub struct EmptyResolver;

impl DependencyResolver for EmptyResolver {
    fn resolve(&self, _log: &[LoggedUnit], target: &CellId) -> Result<Option<Slice>> {
        Ok(Some(Slice::empty(target.clone())))
    }
}

/// Resolver that always fails.
#[derive(Debug, Default)]
pub struct FailingResolver;

impl DependencyResolver for FailingResolver {
    fn resolve(&self, _log: &[LoggedUnit], _target: &CellId) -> Result<Option<Slice>> {
        Err(Error::Resolution("scripted resolver failure".to_string()))
    }
}

/// Wrapper that counts resolve calls, for idempotence and caching
/// assertions.
pub struct CountingResolver {
    inner: Arc<dyn DependencyResolver>,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new(inner: Arc<dyn DependencyResolver>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DependencyResolver for CountingResolver {
    fn resolve(&self, log: &[LoggedUnit], target: &CellId) -> Result<Option<Slice>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(log, target)
    }
}

/// Factory whose one-time initialization always fails, leaving the
/// session permanently degraded.
#[derive(Debug, Default)]
pub struct FailingFactory;

#[async_trait]
impl ResolverFactory for FailingFactory {
    async fn create(&self, _language: &str) -> anyhow::Result<Arc<dyn DependencyResolver>> {
        anyhow::bail!("no analyzer specs found")
    }
}
