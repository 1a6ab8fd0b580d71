use async_trait::async_trait;
use dubbing_domain::{
    assemble_timeline, AudioSegment, DomainError, DubbingContext, PipelineStage,
};
use serde_json::json;

pub const TIMELINE_ASSEMBLE_STEP: &str = "timeline_assemble";

/// Lays dubbed clips onto one track at their sentence onsets.
///
/// Pads to the downloaded video's duration when one is present.
#[derive(Debug, Default)]
pub struct TimelineAssembleStage;

impl TimelineAssembleStage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PipelineStage for TimelineAssembleStage {
    fn name(&self) -> &'static str {
        TIMELINE_ASSEMBLE_STEP
    }

    async fn execute(&self, context: &mut DubbingContext) -> Result<(), DomainError> {
        let target_duration_ms = context
            .video
            .as_ref()
            .map(|video| video.duration_ms)
            .unwrap_or(0);
        let placeholder = AudioSegment::empty(context.sample_rate_hz);
        let pairs = context.dubbed.iter().map(|dubbed| {
            (
                &dubbed.sentence,
                dubbed.outcome.segment().unwrap_or(&placeholder),
            )
        });
        let timeline = assemble_timeline(pairs, target_duration_ms, context.sample_rate_hz);

        for placement in timeline.placements() {
            tracing::debug!(
                session_id = %context.session_id,
                sentence_index = placement.index,
                target_ms = placement.target_ms,
                placed_ms = placement.placed_ms,
                duration_ms = placement.duration_ms,
                drift_ms = placement.drift_ms(),
                "segment placed"
            );
        }
        tracing::debug!(
            session_id = %context.session_id,
            duration_ms = timeline.duration_ms(),
            max_drift_ms = timeline.max_drift_ms(),
            "timeline assembled"
        );

        context.set_extension(
            "timeline.summary",
            json!({
                "duration_ms": timeline.duration_ms(),
                "placed_count": timeline.placements().len(),
                "max_drift_ms": timeline.max_drift_ms(),
                "final_drift_ms": timeline.placements().last().map(|p| p.drift_ms()).unwrap_or(0),
            }),
        );
        context.timeline = Some(timeline.into_audio());
        Ok(())
    }
}
