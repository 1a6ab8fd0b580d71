use std::sync::Arc;

use async_trait::async_trait;
use dubbing_domain::{AudioExportPort, DomainError, DubbingContext, PipelineStage};

pub const AUDIO_EXPORT_STEP: &str = "audio_export";

pub struct AudioExportStage {
    exporter: Arc<dyn AudioExportPort>,
}

impl AudioExportStage {
    pub fn new(exporter: Arc<dyn AudioExportPort>) -> Self {
        Self { exporter }
    }
}

#[async_trait]
impl PipelineStage for AudioExportStage {
    fn name(&self) -> &'static str {
        AUDIO_EXPORT_STEP
    }

    async fn execute(&self, context: &mut DubbingContext) -> Result<(), DomainError> {
        let timeline = context.timeline.as_ref().ok_or_else(|| {
            DomainError::internal_error("audio export requires an assembled timeline")
        })?;
        let path = self.exporter.export(timeline).await?;

        tracing::debug!(
            session_id = %context.session_id,
            path = %path.display(),
            duration_ms = timeline.duration_ms(),
            "timeline exported"
        );
        context.audio_path = Some(path);
        Ok(())
    }
}
