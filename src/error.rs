use thiserror::Error;

/// Failures at the edges of the engine: scripts, config files and output.
///
/// The document and history operations themselves never fail.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("invalid config value for {field}: {message}")]
    InvalidConfig { field: &'static str, message: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("json5 error: {0}")]
    Json5(#[from] json5::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EditorError {
    pub(crate) fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }
}
