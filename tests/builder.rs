// Unit tests for PipelineBuilder
use leitung::error::PipelineError;
use leitung::pipeline::{FunctionRegistry, PipelineBuilder};
use serde_json::json;
use std::sync::Arc;

fn registry() -> Arc<FunctionRegistry> {
    Arc::new(FunctionRegistry::with_builtins())
}

#[test]
fn test_builder_function_success() {
    let pipeline = PipelineBuilder::new("test", registry())
        .function("double")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(pipeline.name(), "test");
    assert_eq!(pipeline.directives().len(), 1);
}

#[test]
fn test_builder_add_nonexistent_function() {
    let result = PipelineBuilder::new("test", registry()).function("nonexistent");
    assert!(matches!(result, Err(PipelineError::UnknownFunction(_))));
}

#[test]
fn test_builder_rejects_invalid_record() {
    let result = PipelineBuilder::new("test", registry())
        .directive(json!({"function": "double"}))
        .directive(json!({"function": "double", "extra": 1}))
        .build();
    assert!(matches!(result, Err(PipelineError::Schema(_))));
}

#[test]
fn test_builder_runs_records() {
    let mut pipeline = PipelineBuilder::new("test", registry())
        .directives([
            json!({"function": "double", "checkpoint": "a"}),
            json!({"function": "add", "args": ["__", "$$a$$", 1]}),
            json!({"function": "divmod", "args": ["__", 4], "result_select": [1]}),
        ])
        .build()
        .unwrap();

    // 3 -> 6 -> 13 -> divmod(13, 4) = [3, 1] -> [1]
    assert_eq!(pipeline.run(json!(3)).unwrap(), json!([1]));
}

#[test]
fn test_builder_attach_to() {
    let registry = registry();
    let mut parent = PipelineBuilder::new("parent", registry.clone())
        .directive(json!({"function": "double", "checkpoint": "doubled"}))
        .directive(json!({"function": "neg"}))
        .build()
        .unwrap();
    let mut child = PipelineBuilder::new("child", registry)
        .directive(json!({"function": "scale", "kwargs": {"factor": 10}}))
        .attach_to(parent.handle(), Some("doubled"))
        .build()
        .unwrap();

    parent.run(json!(2)).unwrap();
    assert_eq!(parent.result(), Some(json!(-4)));
    assert_eq!(child.invoke(None).unwrap().result, json!(40));
}
