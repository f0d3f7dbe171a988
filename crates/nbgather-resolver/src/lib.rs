// Resolver seam - the contract the orchestration layer slices through.
// Computing the dependency graph itself (statement-level use/def
// analysis) lives behind these traits, not in this workspace.

pub mod error;
pub mod heuristic;
pub mod traits;

pub use error::{Error, Result};
pub use heuristic::CellRefResolver;
pub use traits::{latest_execution, DependencyResolver, FixedFactory, ResolverFactory};
