use aws_sdk_dynamodb::error::SdkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    ValidationError(String),

    #[error("Failed to access the document store: {0}")]
    StoreError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Short variant name reported as `type` in 500 response bodies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ParseError(_) => "ParseError",
            ApiError::ValidationError(_) => "ValidationError",
            ApiError::StoreError(_) => "StoreError",
            ApiError::ConfigError(_) => "ConfigError",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::ParseError(error.to_string())
    }
}

impl From<base64::DecodeError> for ApiError {
    fn from(error: base64::DecodeError) -> Self {
        ApiError::ParseError(format!("base64: {error}"))
    }
}

// Generic implementation for AWS SDK errors
impl<E, R> From<SdkError<E, R>> for ApiError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        ApiError::StoreError(aws_sdk_dynamodb::error::DisplayErrorContext(&error).to_string())
    }
}
