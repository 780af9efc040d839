pub mod constants;
pub mod file;

pub use file::{AttachDef, PipelineDef, PipelineFile, PipelineSetDef};
