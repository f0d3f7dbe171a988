//! Testing infrastructure for nbgather integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `fixtures`: sample live-document cells, including the bokeh
//!   five-cell notebook used across the suites
//! - `resolvers`: scripted, empty, failing, and counting resolvers
//!   plus a failing factory for exercising initialization paths
//! - `sink`: a recording report sink for asserting on side-channel
//!   output

pub mod fixtures;
pub mod resolvers;
pub mod sink;

pub use fixtures::{bokeh_cells, cell};
pub use resolvers::{
    CountingResolver, EmptyResolver, FailingFactory, FailingResolver, ScriptedResolver,
};
pub use sink::RecordingSink;
