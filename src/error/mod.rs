/// Centralized error handling for leitung
pub mod pipeline;

pub use pipeline::{BoxError, PipelineError, Result};
