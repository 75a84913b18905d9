use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Input error: script content is empty")]
    EmptyInput,

    #[error("Input error: script content is not valid UTF-8 text")]
    NotText,

    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AnalyzerError {
    /// Bad script input, as opposed to an environment or usage failure.
    pub fn is_input_error(&self) -> bool {
        matches!(self, AnalyzerError::EmptyInput | AnalyzerError::NotText)
    }

    /// Process exit status for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self {
            _ if self.is_input_error() => 3,
            AnalyzerError::InvalidArguments(_) => 2,
            AnalyzerError::IoError(_) => 4,
            _ => 1,
        }
    }
}
