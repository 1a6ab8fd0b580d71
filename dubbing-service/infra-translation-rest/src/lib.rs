use std::time::Duration;

use async_trait::async_trait;
use dubbing_domain::{DomainError, TranslationPort, TranslationRequest};
use serde::{Deserialize, Serialize};

const SERVICE: &str = "translation";
const MAX_LENGTH: u32 = 512;

#[derive(Debug, Clone)]
pub struct RestTranslatorConfig {
    pub base_url: String,
    pub source_lang: String,
    pub timeout: Duration,
}

/// Client for a sequence-to-sequence translation model served over HTTP.
pub struct RestTranslationAdapter {
    client: reqwest::Client,
    config: RestTranslatorConfig,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
    num_beams: u32,
    length_penalty: f32,
    early_stopping: bool,
    max_length: u32,
}

#[derive(Debug, Deserialize)]
struct TranslateReply {
    translated_text: String,
}

impl RestTranslationAdapter {
    pub fn new(config: RestTranslatorConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                DomainError::internal_error(&format!("failed to build translation client: {err}"))
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TranslationPort for RestTranslationAdapter {
    async fn translate(&self, request: TranslationRequest) -> Result<String, DomainError> {
        let body = TranslateBody {
            text: &request.text,
            source_lang: &self.config.source_lang,
            target_lang: request.target.model_code(),
            num_beams: request.beam_width,
            length_penalty: 1.0,
            early_stopping: true,
            max_length: MAX_LENGTH,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                DomainError::external_service_error(SERVICE, &format!("request failed: {err}"))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| {
            DomainError::external_service_error(SERVICE, &format!("failed to read response: {err}"))
        })?;
        if !status.is_success() {
            return Err(DomainError::external_service_error(
                SERVICE,
                &format!("model server answered {status}: {text}"),
            ));
        }

        let reply: TranslateReply = serde_json::from_str(&text).map_err(|err| {
            DomainError::external_service_error(SERVICE, &format!("unexpected response: {err}"))
        })?;
        tracing::debug!(
            target_lang = request.target.model_code(),
            num_beams = request.beam_width,
            input_chars = request.text.len(),
            output_chars = reply.translated_text.len(),
            "sentence translated"
        );
        Ok(reply.translated_text)
    }
}
