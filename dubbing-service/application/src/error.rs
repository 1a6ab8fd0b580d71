use dubbing_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("validation failed ({code}): {message}")]
    Validation { code: String, message: String },

    #[error("business rule failed ({code}): {message}")]
    Business { code: String, message: String },

    #[error("infrastructure failure ({code}): {message}")]
    Infrastructure { code: String, message: String },
}

impl CommandError {
    pub fn validation(code: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn business(code: &str, message: impl Into<String>) -> Self {
        Self::Business {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn infrastructure(code: &str, message: impl Into<String>) -> Self {
        Self::Infrastructure {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Validation { code, .. }
            | Self::Business { code, .. }
            | Self::Infrastructure { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Business { message, .. }
            | Self::Infrastructure { message, .. } => message,
        }
    }
}

pub const TRANSCRIPT_UNAVAILABLE_CODE: &str = "transcript_unavailable";

impl From<ApplicationError> for CommandError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Domain(DomainError::TranscriptUnavailable(message)) => {
                CommandError::business(TRANSCRIPT_UNAVAILABLE_CODE, message)
            }
            ApplicationError::Domain(DomainError::Validation(message)) => {
                CommandError::validation("validation_error", message)
            }
            ApplicationError::Domain(DomainError::ExternalService { service, message }) => {
                CommandError::infrastructure(&format!("{service}_error"), message)
            }
            ApplicationError::Domain(DomainError::Internal(message)) => {
                CommandError::infrastructure("internal_error", message)
            }
            ApplicationError::Validation(message) => {
                CommandError::validation("validation_error", message)
            }
            ApplicationError::Internal(message) => {
                CommandError::infrastructure("internal_error", message)
            }
        }
    }
}
