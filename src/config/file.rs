/// Pipeline file model
use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// A pipeline file: either a bare directive list or a set of named pipelines
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PipelineFile {
    Directives(Vec<Value>),
    Set(PipelineSetDef),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSetDef {
    pub pipelines: Vec<PipelineDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineDef {
    pub name: String,
    #[serde(default)]
    pub attach: Option<AttachDef>,
    /// Directive records, validated when the pipeline is built
    #[serde(default)]
    pub directives: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachDef {
    pub parent: String,
    #[serde(default)]
    pub checkpoint: Option<String>,
}

impl PipelineFile {
    /// Parse a pipeline file from JSON text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a pipeline file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading pipeline file {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Normalize into pipeline definitions; a bare list is named `default_name`
    pub fn into_defs(self, default_name: &str) -> Vec<PipelineDef> {
        match self {
            PipelineFile::Directives(directives) => vec![PipelineDef {
                name: default_name.to_string(),
                attach: None,
                directives,
            }],
            PipelineFile::Set(set) => set.pipelines,
        }
    }
}
