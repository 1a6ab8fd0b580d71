use std::sync::Arc;

use async_trait::async_trait;
use dubbing_domain::{
    search_width, DomainError, DubbedSentence, DubbingContext, PipelineStage, SentenceCaption,
    SpeechSynthesisPort, SynthesisOutcome, TargetLanguage, TranslationFailurePolicy,
    TranslationPort, TranslationRequest,
};
use serde_json::json;

pub const SENTENCE_DUB_STEP: &str = "sentence_dub";

/// Translates and voices each sentence, one at a time and in order.
pub struct SentenceDubStage {
    translator: Arc<dyn TranslationPort>,
    synthesizer: Arc<dyn SpeechSynthesisPort>,
    failure_policy: TranslationFailurePolicy,
}

impl SentenceDubStage {
    pub fn new(
        translator: Arc<dyn TranslationPort>,
        synthesizer: Arc<dyn SpeechSynthesisPort>,
        failure_policy: TranslationFailurePolicy,
    ) -> Self {
        Self {
            translator,
            synthesizer,
            failure_policy,
        }
    }

    async fn translate(
        &self,
        session_id: &str,
        index: usize,
        sentence: &SentenceCaption,
        target: TargetLanguage,
    ) -> Result<String, DomainError> {
        let beam_width = search_width(&sentence.text);
        tracing::debug!(
            session_id,
            sentence_index = index,
            beam_width,
            "translating sentence"
        );

        let request = TranslationRequest {
            text: sentence.text.clone(),
            target,
            beam_width,
        };
        match self.translator.translate(request).await {
            Ok(translated) => Ok(translated),
            Err(error) => match self.failure_policy {
                TranslationFailurePolicy::Fatal => Err(error),
                TranslationFailurePolicy::Passthrough => {
                    tracing::warn!(
                        session_id,
                        sentence_index = index,
                        error = %error,
                        "translation failed; keeping source text"
                    );
                    Ok(sentence.text.clone())
                }
            },
        }
    }

    async fn synthesize(
        &self,
        session_id: &str,
        index: usize,
        text: &str,
        language: TargetLanguage,
        sample_rate_hz: u32,
    ) -> SynthesisOutcome {
        if text.trim().is_empty() {
            tracing::warn!(
                session_id,
                sentence_index = index,
                "nothing to synthesize; using silent placeholder"
            );
            return SynthesisOutcome::Silent {
                reason: "empty translation".to_string(),
            };
        }

        match self.synthesizer.synthesize(text, language).await {
            Ok(segment) => {
                let segment = if segment.sample_rate_hz() == sample_rate_hz {
                    segment
                } else {
                    segment.resampled(sample_rate_hz)
                };
                tracing::debug!(
                    session_id,
                    sentence_index = index,
                    duration_ms = segment.duration_ms(),
                    "sentence synthesized"
                );
                SynthesisOutcome::Spoken(segment)
            }
            Err(error) => {
                tracing::warn!(
                    session_id,
                    sentence_index = index,
                    error = %error,
                    "speech synthesis failed; using silent placeholder"
                );
                SynthesisOutcome::Silent {
                    reason: error.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl PipelineStage for SentenceDubStage {
    fn name(&self) -> &'static str {
        SENTENCE_DUB_STEP
    }

    async fn execute(&self, context: &mut DubbingContext) -> Result<(), DomainError> {
        let mut dubbed = Vec::with_capacity(context.sentences.len());
        for (index, sentence) in context.sentences.iter().enumerate() {
            let translated_text = self
                .translate(&context.session_id, index, sentence, context.target_language)
                .await?;
            let outcome = self
                .synthesize(
                    &context.session_id,
                    index,
                    &translated_text,
                    context.target_language,
                    context.sample_rate_hz,
                )
                .await;
            dubbed.push(DubbedSentence {
                sentence: sentence.clone(),
                translated_text,
                outcome,
            });
        }

        context.dubbed = dubbed;
        let silent = context.silent_sentence_count();
        tracing::debug!(
            session_id = %context.session_id,
            sentence_count = context.dubbed.len(),
            silent_sentence_count = silent,
            "sentences dubbed"
        );
        context.set_extension(
            "dubbing.summary",
            json!({
                "sentence_count": context.dubbed.len(),
                "silent_sentence_count": silent,
            }),
        );
        Ok(())
    }
}
