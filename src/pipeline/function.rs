// Callable contract for directive functions
use crate::error::BoxError;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Keyword arguments, passed through to the function unresolved
pub type Kwargs = Map<String, Value>;

/// Return type of a function call
pub type FnResult = Result<Value, BoxError>;

/// A function invoked by a directive.
///
/// Functions returning several values return a JSON array so `result_select`
/// can index into it.
pub trait Function: Send + Sync {
    fn name(&self) -> String;

    fn call(&self, args: Vec<Value>, kwargs: Option<&Kwargs>) -> FnResult;
}

type Closure = dyn Fn(Vec<Value>, Option<&Kwargs>) -> FnResult + Send + Sync;

/// Function backed by a closure
pub struct FnFunction {
    name: String,
    func: Box<Closure>,
}

impl FnFunction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<Value>, Option<&Kwargs>) -> FnResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl Function for FnFunction {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn call(&self, args: Vec<Value>, kwargs: Option<&Kwargs>) -> FnResult {
        (self.func)(args, kwargs)
    }
}

impl fmt::Debug for FnFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFunction").field("name", &self.name).finish()
    }
}

/// Wrap a closure as a shareable function reference
pub fn function<F>(name: impl Into<String>, func: F) -> Arc<dyn Function>
where
    F: Fn(Vec<Value>, Option<&Kwargs>) -> FnResult + Send + Sync + 'static,
{
    Arc::new(FnFunction::new(name, func))
}
