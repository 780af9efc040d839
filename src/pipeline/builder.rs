// Pipeline builder for fluent pipeline construction from directive records
use super::core::Pipeline;
use super::link::PipelineHandle;
use super::registry::FunctionRegistry;
use crate::error::{PipelineError, Result};
use serde_json::{Value, json};
use std::sync::Arc;

/// Builder for constructing pipelines from registered functions
pub struct PipelineBuilder {
    name: String,
    registry: Arc<FunctionRegistry>,
    records: Vec<Value>,
    parent: Option<(PipelineHandle, Option<String>)>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new(name: impl Into<String>, registry: Arc<FunctionRegistry>) -> Self {
        Self {
            name: name.into(),
            registry,
            records: Vec::new(),
            parent: None,
        }
    }

    /// Add a directive record
    pub fn directive(mut self, record: Value) -> Self {
        self.records.push(record);
        self
    }

    /// Add multiple directive records
    pub fn directives<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.records.extend(records);
        self
    }

    /// Add a directive calling a registered function on the running result
    pub fn function(mut self, name: &str) -> Result<Self> {
        if !self.registry.contains(name) {
            return Err(PipelineError::UnknownFunction(name.to_string()));
        }
        self.records.push(json!({ "function": name }));
        Ok(self)
    }

    /// Seed the pipeline from a parent
    pub fn attach_to(mut self, parent: PipelineHandle, checkpoint: Option<&str>) -> Self {
        self.parent = Some((parent, checkpoint.map(str::to_string)));
        self
    }

    /// Build the pipeline, validating every record
    pub fn build(self) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new(self.name);
        pipeline.append(&self.records, &self.registry)?;

        if let Some((parent, checkpoint)) = self.parent {
            pipeline.attach_handle(parent, checkpoint.as_deref())?;
        }

        Ok(pipeline)
    }
}
