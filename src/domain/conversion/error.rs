use crate::error::AppError;
use uuid::Uuid;

/// Failure of one pipeline stage.
///
/// The variant is kept for diagnostics; callers only ever see a single
/// "processing failed" signal.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("speech synthesis failed for segment {segment}: {message}")]
    Synthesis { segment: usize, message: String },
    #[error("preview rendering failed: {0}")]
    Rendering(String),
    #[error("video encoding failed: {0}")]
    Encoding(String),
    #[error("artifact storage failed: {0}")]
    Storage(#[from] std::io::Error),
    #[error("conversion timed out after {secs} seconds")]
    Timeout { secs: u64 },
}

impl ConversionError {
    /// Short stage name for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            ConversionError::Synthesis { .. } => "synthesis",
            ConversionError::Rendering(_) => "rendering",
            ConversionError::Encoding(_) => "encoding",
            ConversionError::Storage(_) => "storage",
            ConversionError::Timeout { .. } => "timeout",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("conversion not found")]
    NotFound,
    #[error("conversion {id} failed")]
    ProcessingFailed {
        id: Uuid,
        #[source]
        source: ConversionError,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for ConversionServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => ConversionServiceError::Invalid(msg),
            AppError::NotFound(_) => ConversionServiceError::NotFound,
            _ => ConversionServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ConversionServiceError> for AppError {
    fn from(err: ConversionServiceError) -> Self {
        match err {
            ConversionServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ConversionServiceError::NotFound => AppError::NotFound("Conversion not found".to_string()),
            ConversionServiceError::ProcessingFailed { .. } => {
                AppError::ProcessingFailed("Conversion processing failed".to_string())
            }
            ConversionServiceError::Dependency(msg) => AppError::Internal(msg),
            ConversionServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
