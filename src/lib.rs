pub mod cli;
pub mod config;
pub mod error;
pub mod functions;
pub mod logging;
pub mod pipeline;

// Re-export commonly used types
pub use error::{PipelineError, Result};
pub use pipeline::{Directive, FunctionRegistry, Pipeline, PipelineBuilder, PipelineSet};
