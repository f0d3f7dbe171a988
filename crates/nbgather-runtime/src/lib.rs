pub mod config;
pub mod error;
pub mod log;
pub mod provider;
pub mod report;
pub mod session;

pub use config::GatherConfig;
pub use error::{GatherError, Result};
pub use log::SessionLog;
pub use provider::GatherProvider;
pub use report::{CompletionKind, GatherReport, ReportSink, TracingSink};
pub use session::GatherSession;
