// Pipeline linkage - seeding one pipeline from another's run state
use super::checkpoint::CheckpointStore;
use crate::error::{PipelineError, Result};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Transient state of the most recent run
#[derive(Debug, Default)]
pub(crate) struct RunState {
    pub(crate) checkpoints: CheckpointStore,
    pub(crate) result: Option<Value>,
}

/// Shared read access to a pipeline's checkpoints and cached result
#[derive(Clone)]
pub struct PipelineHandle {
    name: String,
    state: Arc<RwLock<RunState>>,
}

impl PipelineHandle {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(RwLock::new(RunState::default())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Result of the last successful run
    pub fn result(&self) -> Option<Value> {
        self.read().result.clone()
    }

    /// Value of a checkpoint from the last run
    pub fn checkpoint(&self, name: &str) -> Result<Value> {
        self.read().checkpoints.get(name).cloned()
    }

    /// Snapshot of all checkpoints from the last run
    pub fn checkpoints(&self) -> CheckpointStore {
        self.read().checkpoints.clone()
    }

    pub(crate) fn reset(&self) {
        let mut state = self.write();
        state.checkpoints.clear();
        state.result = None;
    }

    pub(crate) fn publish(&self, checkpoints: CheckpointStore, result: Option<Value>) {
        let mut state = self.write();
        state.checkpoints = checkpoints;
        state.result = result;
    }

    pub(crate) fn same_as(&self, other: &PipelineHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    // Run state stays consistent even if a holder panicked, so poisoning is ignored
    fn read(&self) -> RwLockReadGuard<'_, RunState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RunState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PipelineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineHandle")
            .field("name", &self.name)
            .finish()
    }
}

/// Parent linkage: where a pipeline takes its seed from
#[derive(Clone, Debug)]
pub struct Link {
    parent: PipelineHandle,
    checkpoint: Option<String>,
}

impl Link {
    pub fn new(parent: PipelineHandle, checkpoint: Option<String>) -> Self {
        Self { parent, checkpoint }
    }

    pub fn parent(&self) -> &PipelineHandle {
        &self.parent
    }

    /// Starting checkpoint in the parent, if any
    pub fn checkpoint(&self) -> Option<&str> {
        self.checkpoint.as_deref()
    }

    /// Capture the seed value from the parent's last run
    pub fn seed(&self) -> Result<Value> {
        match &self.checkpoint {
            Some(name) => self.parent.checkpoint(name).map_err(|_| {
                PipelineError::not_found(format!(
                    "'{name}' of parent pipeline '{}' is not available, make sure the parent pipeline is executed first",
                    self.parent.name()
                ))
            }),
            None => self.parent.result().ok_or_else(|| {
                PipelineError::missing_input(format!(
                    "parent pipeline '{}' has no result, make sure it is executed first",
                    self.parent.name()
                ))
            }),
        }
    }
}

/// Non-fatal condition reported by an invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunWarning {
    /// Explicit input was given to a linked pipeline and ignored
    InputIgnored { pipeline: String, parent: String },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::InputIgnored { pipeline, parent } => write!(
                f,
                "Input data and parent are both specified for pipeline '{pipeline}'. \
                 Input data is ignored, the value is pulled from parent pipeline '{parent}'"
            ),
        }
    }
}
