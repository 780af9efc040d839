// Named pipelines run together in declaration order
use super::builder::PipelineBuilder;
use super::core::{Invocation, Pipeline};
use super::registry::FunctionRegistry;
use crate::config::{PipelineDef, PipelineFile};
use crate::error::{PipelineError, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Ordered collection of named pipelines, possibly linked to each other
#[derive(Default)]
pub struct PipelineSet {
    pipelines: IndexMap<String, Pipeline>,
}

impl PipelineSet {
    pub fn new() -> Self {
        Self {
            pipelines: IndexMap::new(),
        }
    }

    /// Build pipelines from definitions; a parent must be declared before its children
    pub fn from_defs(defs: Vec<PipelineDef>, registry: Arc<FunctionRegistry>) -> Result<Self> {
        let mut set = Self::new();
        for def in defs {
            let mut builder =
                PipelineBuilder::new(def.name.clone(), registry.clone()).directives(def.directives);

            if let Some(attach) = &def.attach {
                let parent = set.pipelines.get(&attach.parent).ok_or_else(|| {
                    PipelineError::config(format!(
                        "pipeline '{}' is attached to '{}', which is not declared before it",
                        def.name, attach.parent
                    ))
                })?;
                builder = builder.attach_to(parent.handle(), attach.checkpoint.as_deref());
            }

            set.insert(builder.build()?)?;
        }
        Ok(set)
    }

    /// Load a pipeline file; a bare directive list is named after the file stem
    pub fn from_file(path: &Path, registry: Arc<FunctionRegistry>) -> Result<Self> {
        let default_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "main".to_string());
        let defs = PipelineFile::load(path)?.into_defs(&default_name);
        Self::from_defs(defs, registry)
    }

    pub fn insert(&mut self, pipeline: Pipeline) -> Result<()> {
        if self.pipelines.contains_key(pipeline.name()) {
            return Err(PipelineError::config(format!(
                "pipeline '{}' is declared more than once",
                pipeline.name()
            )));
        }
        debug!("Registered pipeline '{}'", pipeline.name());
        self.pipelines.insert(pipeline.name().to_string(), pipeline);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Pipeline> {
        self.pipelines.get_mut(name)
    }

    /// The last declared pipeline
    pub fn last(&self) -> Option<&Pipeline> {
        self.pipelines.values().last()
    }

    pub fn names(&self) -> Vec<&str> {
        self.pipelines.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pipeline> {
        self.pipelines.values()
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Run every pipeline in order.
    ///
    /// Unlinked pipelines receive `input`; linked ones take their seed from
    /// their parent. Stops at the first failure.
    pub fn run(&mut self, input: Option<Value>) -> Result<IndexMap<String, Invocation>> {
        let mut outcomes = IndexMap::new();
        for (name, pipeline) in self.pipelines.iter_mut() {
            let data = if pipeline.is_attached() {
                None
            } else {
                input.clone()
            };
            let invocation = pipeline.invoke(data)?;
            outcomes.insert(name.clone(), invocation);
        }
        info!("Ran {} pipelines", outcomes.len());
        Ok(outcomes)
    }
}
