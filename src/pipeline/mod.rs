// Pipeline module - directive execution engine

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod directive;
pub mod function;
pub mod link;
pub mod registry;
pub mod resolver;
pub mod select;
pub mod set;

// Re-export core types
pub use builder::PipelineBuilder;
pub use checkpoint::CheckpointStore;
pub use self::core::{Invocation, Pipeline};
pub use directive::{Directive, DirectiveRecord, Directives, validate_record};
pub use function::{FnFunction, FnResult, Function, Kwargs, function};
pub use link::{Link, PipelineHandle, RunWarning};
pub use registry::FunctionRegistry;
pub use resolver::{CheckpointRef, checkpoint_ref, resolve_args};
pub use select::Selection;
pub use set::PipelineSet;
