use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("{service} service error: {message}")]
    ExternalService { service: String, message: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn internal_error(message: &str) -> Self {
        Self::Internal(message.to_string())
    }

    pub fn external_service_error(service: &str, message: &str) -> Self {
        Self::ExternalService {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    pub fn validation_error(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    pub fn transcript_unavailable(message: &str) -> Self {
        Self::TranscriptUnavailable(message.to_string())
    }

    pub fn is_transcript_unavailable(&self) -> bool {
        matches!(self, Self::TranscriptUnavailable(_))
    }
}
