use std::sync::Arc;

use async_trait::async_trait;
use nbgather_types::{CellId, LoggedUnit, Slice};

use crate::Result;

/// Backward dependency computation over an execution log.
///
/// Contract:
/// - Deterministic given identical log contents and target.
/// - Must not mutate the log.
/// - When the target identity appears more than once in the log, the
///   slice is computed for its *latest* execution
///   (see [`latest_execution`]).
/// - `Ok(None)` means "no slice available" (e.g., the target never ran
///   against this log); a non-fatal condition distinct from `Err`,
///   which signals an actual resolution failure.
pub trait DependencyResolver: Send + Sync {
    fn resolve(&self, log: &[LoggedUnit], target: &CellId) -> Result<Option<Slice>>;
}

/// One-time asynchronous construction of a resolver for a session.
///
/// Called once per session open; failure is terminal for that session
/// until it is reopened.
#[async_trait]
pub trait ResolverFactory: Send + Sync {
    async fn create(&self, language: &str) -> anyhow::Result<Arc<dyn DependencyResolver>>;
}

/// Factory that hands out one pre-built resolver to every session.
pub struct FixedFactory {
    resolver: Arc<dyn DependencyResolver>,
}

impl FixedFactory {
    pub fn new(resolver: Arc<dyn DependencyResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ResolverFactory for FixedFactory {
    async fn create(&self, _language: &str) -> anyhow::Result<Arc<dyn DependencyResolver>> {
        Ok(Arc::clone(&self.resolver))
    }
}

/// Find the latest execution of `target` in the log.
///
/// Log order equals execution order, so the last matching entry wins;
/// `log_event_id` keeps repeat executions of one cell distinct.
pub fn latest_execution<'a>(log: &'a [LoggedUnit], target: &CellId) -> Option<&'a LoggedUnit> {
    log.iter().rev().find(|unit| &unit.persistent_id == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbgather_types::LiveUnit;

    fn logged(id: &str, text: &str, order: i64) -> LoggedUnit {
        let live = LiveUnit::new(CellId::new(id), text).with_execution_order(order);
        LoggedUnit::from_live(&live).unwrap()
    }

    #[test]
    fn test_latest_execution_prefers_most_recent() {
        let log = vec![
            logged("a", "x = 1", 1),
            logged("b", "y = 2", 2),
            logged("a", "x = 3", 3),
        ];

        let latest = latest_execution(&log, &CellId::new("a")).unwrap();
        assert_eq!(latest.text, "x = 3");
        assert_eq!(latest.execution_order, Some(3));
    }

    #[test]
    fn test_latest_execution_missing_target() {
        let log = vec![logged("a", "x = 1", 1)];
        assert!(latest_execution(&log, &CellId::new("z")).is_none());
    }

    #[tokio::test]
    async fn test_fixed_factory_hands_out_shared_resolver() {
        struct Never;
        impl DependencyResolver for Never {
            fn resolve(&self, _log: &[LoggedUnit], _target: &CellId) -> Result<Option<Slice>> {
                Ok(None)
            }
        }

        let factory = FixedFactory::new(Arc::new(Never));
        let first = factory.create("python").await.unwrap();
        let second = factory.create("python").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
