use reqwest::StatusCode;
use thiserror::Error;

/// Typed failures for the transcript and chat services.
///
/// Every variant maps to a stable HTTP status via [`ServiceError::http_status`]
/// so a network surface can forward these without re-classifying.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("No transcript available for this video")]
    NotFound,

    #[error("No transcript data found for this video")]
    NoTranscriptData,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Failed to fetch transcript from YouTube")]
    UpstreamError { status: StatusCode },

    #[error("Invalid API key configuration")]
    AuthError,

    #[error("API quota exceeded. Please try again later.")]
    QuotaExceeded,

    #[error("Content filtered for safety. Please rephrase your question.")]
    ContentFiltered,

    #[error("No response generated")]
    EmptyResponse,

    #[error("Failed to generate response. Please try again.")]
    GenerationFailed,

    #[error("Internal server error")]
    InternalError,
}

impl ServiceError {
    /// Stable status for each failure kind; upstream failures pass their
    /// status through.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) | ServiceError::ContentFiltered => StatusCode::BAD_REQUEST,
            ServiceError::AuthError => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound | ServiceError::NoTranscriptData => StatusCode::NOT_FOUND,
            ServiceError::RateLimited | ServiceError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::UpstreamError { status } => *status,
            ServiceError::EmptyResponse | ServiceError::GenerationFailed | ServiceError::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
