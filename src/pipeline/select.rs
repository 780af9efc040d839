// Lazy projection of multi-valued function output
use crate::error::{PipelineError, Result};
use serde_json::Value;

/// Selected elements of a function's multi-valued return value.
///
/// Nothing is indexed until the selection is iterated or materialized, and
/// iteration can be restarted any number of times. Negative indices count
/// from the end.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    source: Value,
    indices: Vec<i64>,
}

impl Selection {
    pub fn new(source: Value, indices: Vec<i64>) -> Self {
        Self { source, indices }
    }

    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the selected elements
    pub fn iter(&self) -> impl Iterator<Item = Result<&Value>> + '_ {
        self.indices.iter().map(move |&index| self.select(index))
    }

    /// Collect the selected elements into a JSON array
    pub fn materialize(&self) -> Result<Value> {
        self.iter()
            .map(|item| item.cloned())
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn select(&self, index: i64) -> Result<&Value> {
        let items = self.source.as_array().ok_or_else(|| {
            PipelineError::selection(format!(
                "cannot select index {index} from a non-array value {}",
                self.source
            ))
        })?;

        let len = items.len() as i64;
        let position = if index < 0 { len + index } else { index };
        if position < 0 || position >= len {
            return Err(PipelineError::selection(format!(
                "index {index} is out of range for {len} values"
            )));
        }
        Ok(&items[position as usize])
    }
}
