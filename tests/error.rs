// Unit tests for error handling
use leitung::error::PipelineError;
use std::io;

#[test]
fn test_error_from_io() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: PipelineError = io_err.into();

    assert!(matches!(err, PipelineError::Io(_)));
    assert!(err.to_string().contains("I/O error"));
}

#[test]
fn test_error_from_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: PipelineError = json_err.into();
    assert!(matches!(err, PipelineError::Json(_)));
}

#[test]
fn test_error_missing_input() {
    let err = PipelineError::missing_input("no data");
    assert!(matches!(err, PipelineError::MissingInput(_)));
    assert_eq!(err.to_string(), "Missing input: no data");
}

#[test]
fn test_error_name_conflict() {
    let err = PipelineError::occupied_name("mask");
    assert!(matches!(err, PipelineError::NameConflict(_)));
    assert!(err.to_string().contains("'mask' is already occupied"));

    let err = PipelineError::reserved_name("");
    assert!(err.to_string().contains("reserved"));
}

#[test]
fn test_error_function_source() {
    let err = PipelineError::function("f", "bad value".into());
    assert_eq!(err.to_string(), "Function 'f' failed: bad value");
    assert!(std::error::Error::source(&err).is_some());
}
