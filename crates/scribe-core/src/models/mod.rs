//! Domain models for the scribe pipeline.

mod command;
mod context;
mod section;

pub use command::*;
pub use context::*;
pub use section::*;
