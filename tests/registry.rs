// Unit tests for FunctionRegistry
use leitung::pipeline::{FunctionRegistry, function};
use serde_json::json;

#[test]
fn test_registry_new() {
    let registry = FunctionRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn test_registry_register_and_get() {
    let mut registry = FunctionRegistry::new();
    registry.register(function("answer", |_, _| Ok(json!(42))));

    assert!(registry.contains("answer"));
    assert_eq!(registry.len(), 1);

    let answer = registry.get("answer").unwrap();
    assert_eq!(answer.name(), "answer");
    assert_eq!(answer.call(vec![], None).unwrap(), json!(42));
}

#[test]
fn test_registry_get_nonexistent() {
    let registry = FunctionRegistry::new();
    assert!(registry.get("nonexistent").is_none());
}

#[test]
fn test_registry_replaces_same_name() {
    let mut registry = FunctionRegistry::new();
    registry.register_fn("f", |_, _| Ok(json!(1)));
    registry.register_fn("f", |_, _| Ok(json!(2)));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("f").unwrap().call(vec![], None).unwrap(), json!(2));
}

#[test]
fn test_registry_builtins() {
    let registry = FunctionRegistry::with_builtins();
    let names = registry.list_functions();

    for expected in ["add", "divmod", "double", "identity", "scale"] {
        assert!(names.contains(&expected.to_string()), "missing {expected}");
    }
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}
