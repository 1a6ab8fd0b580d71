use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use dubbing_domain::{extract_video_id, DubbingContext, TargetLanguage};

use crate::{ApplicationError, DubVideoRequest, DubVideoResponse, PipelineEngine};

#[async_trait]
pub trait DubVideoUseCase: Send + Sync {
    async fn dub_video(&self, request: DubVideoRequest)
        -> Result<DubVideoResponse, ApplicationError>;
}

pub struct DubVideoUseCaseImpl {
    pipeline: PipelineEngine,
    sample_rate_hz: u32,
    // Working files have fixed names, so runs must not overlap.
    in_flight: Mutex<()>,
}

impl DubVideoUseCaseImpl {
    pub fn new(pipeline: PipelineEngine, sample_rate_hz: u32) -> Self {
        Self {
            pipeline,
            sample_rate_hz,
            in_flight: Mutex::new(()),
        }
    }
}

#[async_trait]
impl DubVideoUseCase for DubVideoUseCaseImpl {
    async fn dub_video(
        &self,
        request: DubVideoRequest,
    ) -> Result<DubVideoResponse, ApplicationError> {
        let target_language: TargetLanguage = request
            .target_lang
            .parse()
            .map_err(|_| {
                ApplicationError::Validation(format!(
                    "unsupported target language `{}`",
                    request.target_lang
                ))
            })?;
        let video_id = extract_video_id(&request.link)?;

        let _guard = self.in_flight.lock().await;
        let mut context = DubbingContext::new(
            Uuid::new_v4().to_string(),
            request.link,
            video_id,
            target_language,
            self.sample_rate_hz,
        );

        tracing::debug!(
            session_id = %context.session_id,
            video_id = %context.video_id,
            target_lang = %target_language,
            "starting dubbing pipeline"
        );

        self.pipeline.run(&mut context).await?;

        let response = DubVideoResponse {
            sentence_count: context.sentences.len(),
            silent_sentence_count: context.silent_sentence_count(),
            timeline_duration_ms: context
                .timeline
                .as_ref()
                .map(|timeline| timeline.duration_ms())
                .unwrap_or(0),
            output_path: context
                .output_path
                .as_ref()
                .map(|path| path.display().to_string()),
            target_lang: target_language.code().to_string(),
            session_id: context.session_id,
            video_id: context.video_id,
        };

        tracing::debug!(
            session_id = %response.session_id,
            sentence_count = response.sentence_count,
            silent_sentence_count = response.silent_sentence_count,
            timeline_duration_ms = response.timeline_duration_ms,
            "dubbing pipeline completed"
        );

        Ok(response)
    }
}
