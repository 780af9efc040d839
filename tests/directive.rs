// Unit tests for directive records and the directive container
use leitung::error::PipelineError;
use leitung::pipeline::{Directive, Directives, FunctionRegistry, Pipeline, validate_record};
use serde_json::{Value, json};

fn registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry.register_fn("echo", |args: Vec<Value>, _| Ok(Value::Array(args)));
    registry
}

#[test]
fn test_validate_record_accepts_all_fields() {
    let record = json!({
        "function": "echo",
        "args": ["__", 1],
        "kwargs": {"k": "v"},
        "checkpoint": "c",
        "result_select": [0]
    });
    assert!(validate_record(&record).is_ok());
}

#[test]
fn test_validate_record_rejects_unknown_key() {
    let err = validate_record(&json!({"function": "echo", "retries": 3})).unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
    assert!(err.to_string().contains("retries"));
}

#[test]
fn test_validate_record_rejects_non_object() {
    for record in [json!("echo"), json!(["echo"]), json!(null), json!(3)] {
        let err = validate_record(&record).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }
}

#[test]
fn test_validate_record_requires_function() {
    let err = validate_record(&json!({"args": [1]})).unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
    let err = validate_record(&json!({"function": 1})).unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
}

#[test]
fn test_from_record_field_shapes() {
    let registry = registry();
    let err = Directive::from_record(&json!({"function": "echo", "args": 5}), &registry).unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));

    let err = Directive::from_record(
        &json!({"function": "echo", "result_select": ["a"]}),
        &registry,
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
}

#[test]
fn test_from_record_defaults() {
    let registry = registry();
    let directive =
        Directive::from_record(&json!({"function": "echo", "checkpoint": null}), &registry).unwrap();

    assert_eq!(directive.args(), vec![json!("__")]);
    assert!(directive.kwargs().is_none());
    assert!(directive.checkpoint().is_none());
    assert!(directive.result_select().is_none());
    assert_eq!(directive.function().name(), "echo");
}

#[test]
fn test_from_record_unknown_function() {
    let err = Directive::from_record(&json!({"function": "missing"}), &registry()).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownFunction(name) if name == "missing"));
}

#[test]
fn test_append_is_all_or_nothing() {
    let registry = registry();
    let mut directives = Directives::new();
    let records = [
        json!({"function": "echo"}),
        json!({"function": "echo", "bogus": true}),
    ];

    let err = directives.append_records(&records, &registry).unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
    assert!(directives.is_empty());

    directives
        .append_records(&records[..1], &registry)
        .unwrap();
    assert_eq!(directives.len(), 1);
}

#[test]
fn test_append_unknown_function_appends_nothing() {
    let mut pipeline = Pipeline::new("p");
    let records = [json!({"function": "echo"}), json!({"function": "nope"})];
    assert!(pipeline.append(&records, &registry()).is_err());
    assert!(pipeline.directives().is_empty());
}

#[test]
fn test_container_operations() {
    let registry = registry();
    let echo = registry.get("echo").unwrap();
    let mut directives: Directives = [
        Directive::new(echo.clone()).with_checkpoint("one"),
        Directive::new(echo.clone()).with_checkpoint("two"),
    ]
    .into_iter()
    .collect();

    directives.push(Directive::new(echo));
    assert_eq!(directives.len(), 3);
    assert_eq!(directives.get(1).unwrap().checkpoint(), Some("two"));

    let removed = directives.remove(0).unwrap();
    assert_eq!(removed.checkpoint(), Some("one"));
    assert!(directives.remove(5).is_none());

    let names: Vec<_> = directives.iter().map(|d| d.checkpoint()).collect();
    assert_eq!(names, vec![Some("two"), None]);

    directives.clear();
    assert!(directives.is_empty());
}

#[test]
fn test_appended_records_execute() {
    let registry = registry();
    let mut pipeline = Pipeline::new("records");
    pipeline
        .append(
            &[
                json!({"function": "echo", "checkpoint": "wrapped"}),
                json!({"function": "echo", "args": ["$$wrapped$$", "__"], "result_select": [1]}),
            ],
            &registry,
        )
        .unwrap();

    assert_eq!(pipeline.run(json!(1)).unwrap(), json!([[1]]));
    assert_eq!(pipeline.checkpoint("wrapped").unwrap(), json!([1]));
}
