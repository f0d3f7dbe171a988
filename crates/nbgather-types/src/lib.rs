pub mod document;
pub mod error;
pub mod slice;
pub mod unit;
mod util;

pub use document::*;
pub use error::{Error, Result};
pub use slice::*;
pub use unit::*;
pub use util::*;
