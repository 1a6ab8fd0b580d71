use std::sync::Arc;

use async_trait::async_trait;
use dubbing_domain::{DomainError, DubbingContext, PipelineStage, TranscriptPort};
use serde_json::json;

pub const TRANSCRIPT_FETCH_STEP: &str = "transcript_fetch";

pub struct TranscriptFetchStage {
    transcripts: Arc<dyn TranscriptPort>,
}

impl TranscriptFetchStage {
    pub fn new(transcripts: Arc<dyn TranscriptPort>) -> Self {
        Self { transcripts }
    }
}

#[async_trait]
impl PipelineStage for TranscriptFetchStage {
    fn name(&self) -> &'static str {
        TRANSCRIPT_FETCH_STEP
    }

    async fn execute(&self, context: &mut DubbingContext) -> Result<(), DomainError> {
        let captions = self.transcripts.fetch_transcript(&context.video_id).await?;
        if captions.is_empty() {
            return Err(DomainError::transcript_unavailable(&format!(
                "no captions returned for video `{}`",
                context.video_id
            )));
        }

        tracing::debug!(
            session_id = %context.session_id,
            video_id = %context.video_id,
            caption_count = captions.len(),
            "transcript fetched"
        );
        context.set_extension("transcript.caption_count", json!(captions.len()));
        context.raw_captions = captions;
        Ok(())
    }
}
