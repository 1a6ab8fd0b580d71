mod audio_export;
mod caption_segment;
mod media_mux;
mod sentence_dub;
mod timeline_assemble;
mod transcript_fetch;
mod video_fetch;

pub use audio_export::{AudioExportStage, AUDIO_EXPORT_STEP};
pub use caption_segment::{CaptionSegmentStage, CAPTION_SEGMENT_STEP};
pub use media_mux::{MediaMuxStage, MEDIA_MUX_STEP};
pub use sentence_dub::{SentenceDubStage, SENTENCE_DUB_STEP};
pub use timeline_assemble::{TimelineAssembleStage, TIMELINE_ASSEMBLE_STEP};
pub use transcript_fetch::{TranscriptFetchStage, TRANSCRIPT_FETCH_STEP};
pub use video_fetch::{VideoFetchStage, VIDEO_FETCH_STEP};

/// Step names of the full dubbing run, in execution order.
pub const DEFAULT_STEPS: [&str; 7] = [
    TRANSCRIPT_FETCH_STEP,
    CAPTION_SEGMENT_STEP,
    SENTENCE_DUB_STEP,
    VIDEO_FETCH_STEP,
    TIMELINE_ASSEMBLE_STEP,
    AUDIO_EXPORT_STEP,
    MEDIA_MUX_STEP,
];
