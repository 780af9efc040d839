/// Pipeline error types
use thiserror::Error;

/// Error type returned by invoked functions
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Checkpoint name conflict: {0}")]
    NameConflict(String),

    #[error("Checkpoint not found: {0}")]
    NotFound(String),

    #[error("Directive schema error: {0}")]
    Schema(String),

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Result selection error: {0}")]
    Selection(String),

    #[error("Function '{function}' failed: {source}")]
    Function {
        function: String,
        #[source]
        source: BoxError,
    },

    #[error("Pipeline configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Create a missing input error
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Checkpoint name is reserved
    pub fn reserved_name(name: &str) -> Self {
        Self::NameConflict(format!(
            "checkpoint name '{name}' is reserved, please select another"
        ))
    }

    /// Checkpoint name is already taken in this run
    pub fn occupied_name(name: &str) -> Self {
        Self::NameConflict(format!(
            "checkpoint name '{name}' is already occupied, please select another"
        ))
    }

    /// Create a checkpoint not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a result selection error
    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }

    /// Wrap an error raised by an invoked function
    pub fn function(function: impl Into<String>, source: BoxError) -> Self {
        Self::Function {
            function: function.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
