use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dubbing_application::{CommandError, TRANSCRIPT_UNAVAILABLE_CODE};

#[derive(Debug)]
pub enum HttpError {
    Validation { message: String },
    TranscriptUnavailable { detail: String },
    NotFound,
    Internal { message: String },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::Validation { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            HttpError::TranscriptUnavailable { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: Unable to fetch transcript from YouTube. {detail}"),
            ),
            HttpError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            HttpError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, body).into_response()
    }
}

pub fn error_mapper(error: CommandError) -> HttpError {
    match error {
        CommandError::Validation { message, .. } => HttpError::Validation { message },
        CommandError::Business { code, message } if code == TRANSCRIPT_UNAVAILABLE_CODE => {
            HttpError::TranscriptUnavailable { detail: message }
        }
        CommandError::Business { message, .. } => HttpError::Validation { message },
        CommandError::Infrastructure { message, .. } => HttpError::Internal { message },
    }
}
