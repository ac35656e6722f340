use thiserror::Error;

/// Main error type for the splitter library
///
/// Scanning itself never fails; malformed SQL is reported through
/// [`crate::StatementFinishState`]. These variants cover caller misuse and
/// configuration loading.
#[derive(Error, Debug)]
pub enum SplitterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Delimiter must not be empty")]
    EmptyDelimiter,
    #[error("Invalid server version: {0}")]
    InvalidVersion(String),
    #[error("Background split failed: {0}")]
    Worker(String),
}

impl SplitterError {
    pub fn new_invalid_version(got: impl std::fmt::Display) -> Self {
        SplitterError::InvalidVersion(got.to_string())
    }
}

/// Type alias for Results using SplitterError
pub type Result<T> = std::result::Result<T, SplitterError>;
