use async_trait::async_trait;
use dubbing_domain::{segment_captions, DomainError, DubbingContext, PipelineStage};
use serde_json::json;

pub const CAPTION_SEGMENT_STEP: &str = "caption_segment";

#[derive(Debug, Default)]
pub struct CaptionSegmentStage;

impl CaptionSegmentStage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PipelineStage for CaptionSegmentStage {
    fn name(&self) -> &'static str {
        CAPTION_SEGMENT_STEP
    }

    async fn execute(&self, context: &mut DubbingContext) -> Result<(), DomainError> {
        context.sentences = segment_captions(&context.raw_captions);
        tracing::debug!(
            session_id = %context.session_id,
            caption_count = context.raw_captions.len(),
            sentence_count = context.sentences.len(),
            "captions grouped into sentences"
        );
        context.set_extension(
            "captions.segmentation",
            json!({
                "caption_count": context.raw_captions.len(),
                "sentence_count": context.sentences.len(),
            }),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dubbing_domain::{RawCaption, TargetLanguage};

    use super::*;

    #[tokio::test]
    async fn sentences_replace_raw_fragments() {
        let mut context =
            DubbingContext::new("s", "url", "vid", TargetLanguage::Spanish, 24_000);
        context.raw_captions = vec![
            RawCaption::new("hello", 0.0, 1.0),
            RawCaption::new("world.", 1.0, 1.0),
            RawCaption::new("again", 3.0, 1.0),
        ];

        CaptionSegmentStage::new()
            .execute(&mut context)
            .await
            .expect("segmentation succeeds");

        assert_eq!(context.sentences.len(), 2);
        assert_eq!(context.sentences[0].text, "hello world.");
        assert_eq!(
            context.extension("captions.segmentation"),
            Some(&json!({"caption_count": 3, "sentence_count": 2}))
        );
    }
}
