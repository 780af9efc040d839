// Pipeline core - directive execution engine
use super::checkpoint::CheckpointStore;
use super::directive::{Directive, Directives};
use super::link::{Link, PipelineHandle, RunWarning};
use super::registry::FunctionRegistry;
use super::resolver::{resolve_args, uses_result};
use super::select::Selection;
use crate::error::{PipelineError, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Running result threaded between directives
enum Carry {
    Value(Value),
    Selected(Selection),
}

impl Carry {
    fn into_value(self) -> Result<Value> {
        match self {
            Carry::Value(value) => Ok(value),
            Carry::Selected(selection) => selection.materialize(),
        }
    }
}

/// Outcome of a successful invocation
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub result: Value,
    pub warnings: Vec<RunWarning>,
}

/// Pipeline - threads a running result through its directives
pub struct Pipeline {
    name: String,
    directives: Directives,
    handle: PipelineHandle,
    link: Option<Link>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            handle: PipelineHandle::new(name.clone()),
            name,
            directives: Directives::new(),
            link: None,
        }
    }

    pub fn with_directives<I>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = Directive>,
    {
        self.directives.extend(directives);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn directives_mut(&mut self) -> &mut Directives {
        &mut self.directives
    }

    pub fn push(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Validate and append directive records; nothing is appended on error
    pub fn append(&mut self, records: &[Value], registry: &FunctionRegistry) -> Result<()> {
        self.directives.append_records(records, registry)
    }

    /// Handle to this pipeline's run state, for attaching children
    pub fn handle(&self) -> PipelineHandle {
        self.handle.clone()
    }

    /// Result of the last successful invocation
    pub fn result(&self) -> Option<Value> {
        self.handle.result()
    }

    /// Checkpoint saved during the last invocation
    pub fn checkpoint(&self, name: &str) -> Result<Value> {
        self.handle.checkpoint(name)
    }

    /// Snapshot of the checkpoints saved during the last invocation
    pub fn checkpoints(&self) -> CheckpointStore {
        self.handle.checkpoints()
    }

    /// Seed future runs from `parent`: its checkpoint `checkpoint` if given, else its result
    pub fn attach(&mut self, parent: &Pipeline, checkpoint: Option<&str>) {
        self.link_to(parent.handle(), checkpoint);
    }

    /// Attach through a handle; a pipeline cannot be its own parent
    pub fn attach_handle(&mut self, parent: PipelineHandle, checkpoint: Option<&str>) -> Result<()> {
        if parent.same_as(&self.handle) {
            return Err(PipelineError::config(format!(
                "pipeline '{}' cannot be attached to itself",
                self.name
            )));
        }
        self.link_to(parent, checkpoint);
        Ok(())
    }

    fn link_to(&mut self, parent: PipelineHandle, checkpoint: Option<&str>) {
        debug!(
            "Attaching pipeline '{}' to parent '{}' (checkpoint: {:?})",
            self.name,
            parent.name(),
            checkpoint
        );
        self.link = Some(Link::new(parent, checkpoint.map(str::to_string)));
    }

    /// Drop the parent linkage; runs take caller input again
    pub fn detach(&mut self) {
        if let Some(link) = self.link.take() {
            debug!(
                "Detached pipeline '{}' from parent '{}'",
                self.name,
                link.parent().name()
            );
        }
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.link.is_some()
    }

    /// Run the pipeline and return only the result.
    ///
    /// Run warnings such as [`RunWarning::InputIgnored`] are dropped here and
    /// only reach the log; use [`Pipeline::invoke`] to receive them.
    pub fn run(&mut self, data: impl Into<Option<Value>>) -> Result<Value> {
        self.invoke(data.into()).map(|invocation| invocation.result)
    }

    /// Run the pipeline from scratch.
    ///
    /// Checkpoints and result are reset first. The seed comes from the parent
    /// linkage when there is one, otherwise from `data`.
    pub fn invoke(&mut self, data: Option<Value>) -> Result<Invocation> {
        self.handle.reset();

        let mut warnings = Vec::new();
        let seed = match (&self.link, data) {
            (Some(link), data) => {
                if data.is_some() {
                    let warning = RunWarning::InputIgnored {
                        pipeline: self.name.clone(),
                        parent: link.parent().name().to_string(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
                link.seed()?
            }
            (None, Some(data)) => data,
            (None, None) => {
                return Err(PipelineError::missing_input(format!(
                    "pipeline '{}' needs input data or a parent pipeline",
                    self.name
                )));
            }
        };

        let mut checkpoints = CheckpointStore::new();
        let outcome = self.execute(seed, &mut checkpoints);
        match outcome {
            Ok(result) => {
                self.handle.publish(checkpoints, Some(result.clone()));
                Ok(Invocation { result, warnings })
            }
            Err(e) => {
                self.handle.publish(checkpoints, None);
                Err(e)
            }
        }
    }

    fn execute(&self, seed: Value, checkpoints: &mut CheckpointStore) -> Result<Value> {
        debug!(
            "Executing pipeline '{}' with {} directives",
            self.name,
            self.directives.len()
        );

        let mut carry = Carry::Value(seed);
        for (index, directive) in self.directives.iter().enumerate() {
            let function = directive.function();
            debug!("Processing directive {}: '{}'", index + 1, function.name());

            let args = directive.args();
            let current = if uses_result(&args) {
                carry.into_value()?
            } else {
                Value::Null
            };
            let args = resolve_args(&current, &args, checkpoints)?;

            let output = function
                .call(args, directive.kwargs())
                .map_err(|e| PipelineError::function(function.name(), e))?;

            if let Some(name) = directive.checkpoint() {
                checkpoints.set(name, output.clone())?;
            }

            carry = match directive.result_select() {
                Some(indices) => Carry::Selected(Selection::new(output, indices.to_vec())),
                None => Carry::Value(output),
            };
        }

        let result = carry.into_value()?;
        debug!("Pipeline '{}' executed successfully", self.name);
        Ok(result)
    }
}
