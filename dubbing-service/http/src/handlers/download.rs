use std::io::ErrorKind;

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::error::HttpError;
use crate::AppState;

pub async fn play_audio(State(state): State<AppState>) -> Result<Response, HttpError> {
    let file = match tokio::fs::File::open(&state.output_path).await {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %state.output_path.display(), "no dubbed output yet");
            return Err(HttpError::NotFound);
        }
        Err(err) => {
            tracing::error!(path = %state.output_path.display(), error = %err, "failed to open dubbed output");
            return Err(HttpError::Internal {
                message: format!("failed to read output: {err}"),
            });
        }
    };
    let size = file
        .metadata()
        .await
        .map_err(|err| HttpError::Internal {
            message: format!("failed to read output: {err}"),
        })?
        .len();

    let filename = state
        .output_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "final_video.mp4".to_string());
    tracing::info!(filename = %filename, size, "streaming dubbed output");

    Ok((
        [
            (header::CONTENT_TYPE, "video/mp4".to_string()),
            (header::CONTENT_LENGTH, size.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
