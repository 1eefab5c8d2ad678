use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;
