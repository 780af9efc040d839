// Placeholder resolution for directive arguments
use super::checkpoint::CheckpointStore;
use crate::config::constants::{CHECKPOINT_DELIMITER, RESULT_TOKEN};
use crate::error::Result;
use serde_json::Value;

/// A `$$name$$` argument referring to a saved checkpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckpointRef<'a> {
    name: &'a str,
}

impl<'a> CheckpointRef<'a> {
    /// Match a string against the checkpoint reference pattern.
    ///
    /// The delimiter must appear on both sides and the enclosed name must be
    /// non-empty, so `$$$$` is a plain literal.
    pub fn parse(text: &'a str) -> Option<Self> {
        let name = text
            .strip_prefix(CHECKPOINT_DELIMITER)?
            .strip_suffix(CHECKPOINT_DELIMITER)?;
        if name.is_empty() {
            return None;
        }
        Some(Self { name })
    }

    /// Match a JSON argument; only strings can be references
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_str().and_then(Self::parse)
    }

    pub fn name(&self) -> &'a str {
        self.name
    }
}

/// Format a checkpoint reference for `name`
pub fn checkpoint_ref(name: &str) -> String {
    format!("{CHECKPOINT_DELIMITER}{name}{CHECKPOINT_DELIMITER}")
}

/// The result token as a JSON argument
pub fn result_token() -> Value {
    Value::String(RESULT_TOKEN.to_string())
}

pub fn is_result_token(arg: &Value) -> bool {
    arg.as_str() == Some(RESULT_TOKEN)
}

/// Whether any argument asks for the running result
pub fn uses_result(args: &[Value]) -> bool {
    args.iter().any(is_result_token)
}

/// Replace every result token with the running result
pub fn substitute_result(result: &Value, args: &[Value]) -> Vec<Value> {
    args.iter()
        .map(|arg| {
            if is_result_token(arg) {
                result.clone()
            } else {
                arg.clone()
            }
        })
        .collect()
}

/// Replace every checkpoint reference with the saved value
pub fn substitute_checkpoints(args: Vec<Value>, checkpoints: &CheckpointStore) -> Result<Vec<Value>> {
    args.into_iter()
        .map(|arg| match CheckpointRef::from_value(&arg) {
            Some(reference) => checkpoints.get(reference.name()).cloned(),
            None => Ok(arg),
        })
        .collect()
}

/// Resolve a directive's arguments: result substitution, then checkpoint substitution
pub fn resolve_args(
    result: &Value,
    args: &[Value],
    checkpoints: &CheckpointStore,
) -> Result<Vec<Value>> {
    substitute_checkpoints(substitute_result(result, args), checkpoints)
}
