use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    AudioSegment, DomainError, DownloadedVideo, DubbingContext, RawCaption, TargetLanguage,
};

#[async_trait]
pub trait PipelineStage: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, context: &mut DubbingContext) -> Result<(), DomainError>;
}

#[async_trait]
pub trait TranscriptPort: Send + Sync {
    /// Returns captions ordered by start time, or `TranscriptUnavailable`.
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<RawCaption>, DomainError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target: TargetLanguage,
    pub beam_width: u32,
}

#[async_trait]
pub trait TranslationPort: Send + Sync {
    async fn translate(&self, request: TranslationRequest) -> Result<String, DomainError>;
}

#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        language: TargetLanguage,
    ) -> Result<AudioSegment, DomainError>;
}

#[async_trait]
pub trait VideoFetchPort: Send + Sync {
    /// Downloads the video behind `url` and returns the local file path.
    async fn download(&self, url: &str) -> Result<PathBuf, DomainError>;
}

#[async_trait]
pub trait MediaProbePort: Send + Sync {
    async fn duration_ms(&self, path: &Path) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait AudioExportPort: Send + Sync {
    /// Encodes the assembled track to the configured compressed format.
    async fn export(&self, audio: &AudioSegment) -> Result<PathBuf, DomainError>;
}

#[async_trait]
pub trait MediaMuxPort: Send + Sync {
    /// Muxes `audio` onto `video`, clipping audio to the video duration.
    async fn mux(&self, video: &DownloadedVideo, audio: &Path) -> Result<PathBuf, DomainError>;
}
