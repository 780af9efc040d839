// Checkpoint store - named intermediate results of a single run
use crate::config::constants::RESERVED_CHECKPOINT_NAMES;
use crate::error::{PipelineError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Named values saved during one pipeline run, in the order they were produced
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CheckpointStore {
    data: IndexMap<String, Value>,
}

impl CheckpointStore {
    pub fn new() -> Self {
        Self {
            data: IndexMap::new(),
        }
    }

    /// Save `value` under `name`.
    ///
    /// Fails with [`PipelineError::NameConflict`] if the name is reserved or
    /// was already assigned since the store was last cleared.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        if RESERVED_CHECKPOINT_NAMES.contains(&name) {
            return Err(PipelineError::reserved_name(name));
        }
        if self.data.contains_key(name) {
            return Err(PipelineError::occupied_name(name));
        }
        debug!("Checkpoint '{}' saved", name);
        self.data.insert(name.to_string(), value);
        Ok(())
    }

    /// Look up a checkpoint, failing with [`PipelineError::NotFound`] if absent
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.data.get(name).ok_or_else(|| {
            PipelineError::not_found(format!(
                "'{name}' is not available, make sure the directive producing it runs first"
            ))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
