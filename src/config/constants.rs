//! Constants for leitung

/// Argument token replaced by the running result
pub const RESULT_TOKEN: &str = "__";

/// Delimiter wrapping a checkpoint reference on both sides, e.g. `$$loaded$$`
pub const CHECKPOINT_DELIMITER: &str = "$$";

/// Checkpoint names that can never be assigned
pub const RESERVED_CHECKPOINT_NAMES: &[&str] = &[""];

/// Keys allowed in a directive record
pub const DIRECTIVE_KEYS: &[&str] = &["function", "args", "kwargs", "checkpoint", "result_select"];

/// Default console log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Level used for the optional log file
pub const FILE_LOG_LEVEL: &str = "debug";
