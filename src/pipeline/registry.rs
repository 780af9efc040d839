// Function registry for resolving directive records by name
use super::function::{FnFunction, FnResult, Function, Kwargs};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of functions available to directive records
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn Function>>,
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in functions
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::functions::register_builtins(&mut registry);
        registry
    }

    /// Register a function under its own name, replacing any previous one
    pub fn register(&mut self, function: Arc<dyn Function>) {
        self.functions.insert(function.name(), function);
    }

    /// Register a closure under a name
    pub fn register_fn<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(Vec<Value>, Option<&Kwargs>) -> FnResult + Send + Sync + 'static,
    {
        self.register(Arc::new(FnFunction::new(name, func)));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Function>> {
        self.functions.get(name).cloned()
    }

    /// Check if a function is registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// List all registered function names, sorted
    pub fn list_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
