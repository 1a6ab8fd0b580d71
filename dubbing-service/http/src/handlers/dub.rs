use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use dubbing_application::{DubVideoCommand, DubVideoRequest};

use crate::error::{error_mapper, HttpError};
use crate::AppState;

pub async fn submit_dub(
    State(state): State<AppState>,
    Form(request): Form<DubVideoRequest>,
) -> Result<Response, HttpError> {
    tracing::info!(
        link = %request.link,
        target_lang = %request.target_lang,
        "received dub request"
    );

    let command = DubVideoCommand::new(request);
    match state.command_service.execute(command).await {
        Ok(result) => {
            tracing::info!(
                session_id = %result.session_id,
                video_id = %result.video_id,
                sentence_count = result.sentence_count,
                silent_sentence_count = result.silent_sentence_count,
                timeline_duration_ms = result.timeline_duration_ms,
                "dub request completed"
            );
            Ok(Redirect::to("/play_audio").into_response())
        }
        Err(error) => {
            tracing::error!(error = %error, "dub request failed");
            Err(error_mapper(error))
        }
    }
}
