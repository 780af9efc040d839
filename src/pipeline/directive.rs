// Directives and the ordered directive container
use super::function::{Function, Kwargs};
use super::registry::FunctionRegistry;
use super::resolver::result_token;
use crate::config::constants::DIRECTIVE_KEYS;
use crate::error::{PipelineError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One step of a pipeline: a function call plus optional bookkeeping
#[derive(Clone)]
pub struct Directive {
    function: Arc<dyn Function>,
    args: Option<Vec<Value>>,
    kwargs: Option<Kwargs>,
    checkpoint: Option<String>,
    result_select: Option<Vec<i64>>,
}

impl Directive {
    pub fn new(function: Arc<dyn Function>) -> Self {
        Self {
            function,
            args: None,
            kwargs: None,
            checkpoint: None,
            result_select: None,
        }
    }

    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.args = Some(args.into_iter().collect());
        self
    }

    pub fn with_kwargs(mut self, kwargs: Kwargs) -> Self {
        self.kwargs = Some(kwargs);
        self
    }

    pub fn with_checkpoint(mut self, name: impl Into<String>) -> Self {
        self.checkpoint = Some(name.into());
        self
    }

    pub fn with_result_select<I>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.result_select = Some(indices.into_iter().collect());
        self
    }

    pub fn function(&self) -> &Arc<dyn Function> {
        &self.function
    }

    /// Positional arguments; a single result token when none were given
    pub fn args(&self) -> Vec<Value> {
        match &self.args {
            Some(args) => args.clone(),
            None => vec![result_token()],
        }
    }

    pub fn kwargs(&self) -> Option<&Kwargs> {
        self.kwargs.as_ref()
    }

    pub fn checkpoint(&self) -> Option<&str> {
        self.checkpoint.as_deref()
    }

    pub fn result_select(&self) -> Option<&[i64]> {
        self.result_select.as_deref()
    }

    /// Build a directive from a JSON record, resolving the function by name
    pub fn from_record(record: &Value, registry: &FunctionRegistry) -> Result<Self> {
        let record = DirectiveRecord::parse(record)?;
        record.into_directive(registry)
    }
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directive")
            .field("function", &self.function.name())
            .field("args", &self.args)
            .field("kwargs", &self.kwargs)
            .field("checkpoint", &self.checkpoint)
            .field("result_select", &self.result_select)
            .finish()
    }
}

/// Serialized form of a directive, as found in pipeline files
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectiveRecord {
    pub function: String,
    #[serde(default)]
    pub args: Option<Vec<Value>>,
    #[serde(default)]
    pub kwargs: Option<Kwargs>,
    #[serde(default)]
    pub checkpoint: Option<String>,
    #[serde(default)]
    pub result_select: Option<Vec<i64>>,
}

impl DirectiveRecord {
    /// Validate the shape of a record and parse it
    pub fn parse(record: &Value) -> Result<Self> {
        validate_record(record)?;
        serde_json::from_value(record.clone())
            .map_err(|e| PipelineError::schema(format!("invalid directive {record}: {e}")))
    }

    pub fn into_directive(self, registry: &FunctionRegistry) -> Result<Directive> {
        let function = registry
            .get(&self.function)
            .ok_or_else(|| PipelineError::UnknownFunction(self.function.clone()))?;

        Ok(Directive {
            function,
            args: self.args,
            kwargs: self.kwargs,
            checkpoint: self.checkpoint,
            result_select: self.result_select,
        })
    }
}

/// Check that a record is an object holding only recognized keys, with a function
pub fn validate_record(record: &Value) -> Result<()> {
    let object = record.as_object().ok_or_else(|| {
        PipelineError::schema(format!("a directive must be an object, got {record}"))
    })?;

    for key in object.keys() {
        if !DIRECTIVE_KEYS.contains(&key.as_str()) {
            return Err(PipelineError::schema(format!(
                "unrecognized key '{key}', allowed keys are {DIRECTIVE_KEYS:?}"
            )));
        }
    }

    match object.get("function") {
        Some(Value::String(_)) => Ok(()),
        Some(other) => Err(PipelineError::schema(format!(
            "'function' must be a function name, got {other}"
        ))),
        None => Err(PipelineError::schema("'function' is required")),
    }
}

/// Ordered sequence of directives owned by a pipeline
#[derive(Clone, Debug, Default)]
pub struct Directives {
    items: Vec<Directive>,
}

impl Directives {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, directive: Directive) {
        self.items.push(directive);
    }

    pub fn extend<I>(&mut self, directives: I)
    where
        I: IntoIterator<Item = Directive>,
    {
        self.items.extend(directives);
    }

    /// Validate every record, then append them all.
    ///
    /// Nothing is appended if any record is rejected.
    pub fn append_records(&mut self, records: &[Value], registry: &FunctionRegistry) -> Result<()> {
        let parsed = records
            .iter()
            .map(DirectiveRecord::parse)
            .collect::<Result<Vec<_>>>()?;

        let directives = parsed
            .into_iter()
            .map(|record| record.into_directive(registry))
            .collect::<Result<Vec<_>>>()?;

        debug!("Appending {} directives", directives.len());
        self.items.extend(directives);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Directive> {
        self.items.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Directive> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl FromIterator<Directive> for Directives {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Directives {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
