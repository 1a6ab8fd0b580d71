use std::sync::Arc;

use async_trait::async_trait;
use dubbing_domain::{DomainError, DubbingContext, MediaMuxPort, PipelineStage};

pub const MEDIA_MUX_STEP: &str = "media_mux";

pub struct MediaMuxStage {
    muxer: Arc<dyn MediaMuxPort>,
}

impl MediaMuxStage {
    pub fn new(muxer: Arc<dyn MediaMuxPort>) -> Self {
        Self { muxer }
    }
}

#[async_trait]
impl PipelineStage for MediaMuxStage {
    fn name(&self) -> &'static str {
        MEDIA_MUX_STEP
    }

    async fn execute(&self, context: &mut DubbingContext) -> Result<(), DomainError> {
        let video = context
            .video
            .as_ref()
            .ok_or_else(|| DomainError::internal_error("mux requires a downloaded video"))?;
        let audio = context
            .audio_path
            .as_deref()
            .ok_or_else(|| DomainError::internal_error("mux requires an exported audio track"))?;

        let output = self.muxer.mux(video, audio).await?;
        tracing::debug!(
            session_id = %context.session_id,
            path = %output.display(),
            "dubbed video written"
        );
        context.output_path = Some(output);
        Ok(())
    }
}
