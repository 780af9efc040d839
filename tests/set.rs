// Integration tests for pipeline files and pipeline sets
use leitung::config::PipelineFile;
use leitung::error::PipelineError;
use leitung::pipeline::{FunctionRegistry, PipelineSet};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

fn registry() -> Arc<FunctionRegistry> {
    Arc::new(FunctionRegistry::with_builtins())
}

const LINKED: &str = r#"{
    "pipelines": [
        {
            "name": "prepare",
            "directives": [
                {"function": "double", "checkpoint": "doubled"},
                {"function": "add", "args": ["__", "$$doubled$$"]}
            ]
        },
        {
            "name": "from_result",
            "attach": {"parent": "prepare"},
            "directives": [{"function": "neg"}]
        },
        {
            "name": "from_checkpoint",
            "attach": {"parent": "prepare", "checkpoint": "doubled"},
            "directives": [{"function": "scale", "kwargs": {"factor": 3}}]
        }
    ]
}"#;

fn set_from(content: &str) -> leitung::Result<PipelineSet> {
    let defs = PipelineFile::parse(content)?.into_defs("main");
    PipelineSet::from_defs(defs, registry())
}

#[test]
fn test_run_linked_set() {
    let mut set = set_from(LINKED).unwrap();
    assert_eq!(set.names(), vec!["prepare", "from_result", "from_checkpoint"]);

    let outcomes = set.run(Some(json!(5))).unwrap();

    assert_eq!(outcomes["prepare"].result, json!(20));
    assert_eq!(outcomes["from_result"].result, json!(-20));
    assert_eq!(outcomes["from_checkpoint"].result, json!(30));
    assert!(outcomes.values().all(|outcome| outcome.warnings.is_empty()));
    assert_eq!(set.last().unwrap().name(), "from_checkpoint");
}

#[test]
fn test_set_without_input() {
    let mut set = set_from(LINKED).unwrap();
    let err = set.run(None).unwrap_err();
    assert!(matches!(err, PipelineError::MissingInput(_)));
}

#[test]
fn test_parent_must_be_declared_first() {
    let content = r#"{
        "pipelines": [
            {"name": "child", "attach": {"parent": "parent"}, "directives": []},
            {"name": "parent", "directives": []}
        ]
    }"#;
    let err = set_from(content).err().unwrap();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn test_duplicate_pipeline_name() {
    let content = r#"{"pipelines": [{"name": "a"}, {"name": "a"}]}"#;
    let err = set_from(content).err().unwrap();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn test_invalid_directive_in_file() {
    let content = r#"[{"function": "double", "unknown": 1}]"#;
    let err = set_from(content).err().unwrap();
    assert!(matches!(err, PipelineError::Schema(_)));
}

#[test]
fn test_bare_directive_list_from_file() {
    let mut file = tempfile::Builder::new()
        .prefix("halve")
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(
        file,
        r#"[{{"function": "divmod", "args": ["__", 2], "result_select": [0]}}]"#
    )
    .unwrap();

    let mut set = PipelineSet::from_file(file.path(), registry()).unwrap();
    assert_eq!(set.len(), 1);

    let name = set.names()[0].to_string();
    assert!(name.starts_with("halve"));

    let outcomes = set.run(Some(json!(9))).unwrap();
    assert_eq!(outcomes[&name].result, json!([4]));
}

#[test]
fn test_missing_file() {
    let err = PipelineSet::from_file(std::path::Path::new("/nonexistent/pipeline.json"), registry())
        .err()
        .unwrap();
    assert!(matches!(err, PipelineError::Io(_)));
}
