use std::sync::Arc;

use async_trait::async_trait;
use dubbing_domain::{
    DomainError, DownloadedVideo, DubbingContext, MediaProbePort, PipelineStage, VideoFetchPort,
};
use serde_json::json;

pub const VIDEO_FETCH_STEP: &str = "video_fetch";

pub struct VideoFetchStage {
    fetcher: Arc<dyn VideoFetchPort>,
    probe: Arc<dyn MediaProbePort>,
}

impl VideoFetchStage {
    pub fn new(fetcher: Arc<dyn VideoFetchPort>, probe: Arc<dyn MediaProbePort>) -> Self {
        Self { fetcher, probe }
    }
}

#[async_trait]
impl PipelineStage for VideoFetchStage {
    fn name(&self) -> &'static str {
        VIDEO_FETCH_STEP
    }

    async fn execute(&self, context: &mut DubbingContext) -> Result<(), DomainError> {
        let path = self.fetcher.download(&context.video_url).await?;
        let duration_ms = self.probe.duration_ms(&path).await?;

        tracing::debug!(
            session_id = %context.session_id,
            path = %path.display(),
            duration_ms,
            "video downloaded"
        );
        context.set_extension(
            "video.source",
            json!({
                "path": path.display().to_string(),
                "duration_ms": duration_ms,
            }),
        );
        context.video = Some(DownloadedVideo { path, duration_ms });
        Ok(())
    }
}
