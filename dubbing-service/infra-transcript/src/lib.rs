use std::time::Duration;

use async_trait::async_trait;
use dubbing_domain::{DomainError, RawCaption, TranscriptPort};
use reqwest::Url;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct TimedTextConfig {
    pub base_url: String,
    pub language: String,
    pub timeout: Duration,
}

/// Reads timed captions from a `json3` timed-text endpoint.
pub struct TimedTextTranscriptAdapter {
    client: reqwest::Client,
    config: TimedTextConfig,
}

impl TimedTextTranscriptAdapter {
    pub fn new(config: TimedTextConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                DomainError::internal_error(&format!("failed to build transcript client: {err}"))
            })?;
        Ok(Self { client, config })
    }

    fn request_url(&self, video_id: &str) -> Result<Url, DomainError> {
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("v", video_id),
                ("lang", self.config.language.as_str()),
                ("fmt", "json3"),
            ],
        )
        .map_err(|err| DomainError::internal_error(&format!("invalid transcript url: {err}")))
    }
}

#[async_trait]
impl TranscriptPort for TimedTextTranscriptAdapter {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<RawCaption>, DomainError> {
        let url = self.request_url(video_id)?;
        tracing::debug!(video_id, url = %url, "fetching transcript");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| DomainError::transcript_unavailable(&format!("request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::transcript_unavailable(&format!(
                "transcript source answered {status}"
            )));
        }

        let body = response.text().await.map_err(|err| {
            DomainError::transcript_unavailable(&format!("failed to read transcript: {err}"))
        })?;
        let captions = parse_json3(&body)?;
        if captions.is_empty() {
            return Err(DomainError::transcript_unavailable(&format!(
                "no captions available for video `{video_id}`"
            )));
        }

        tracing::debug!(video_id, caption_count = captions.len(), "transcript parsed");
        Ok(captions)
    }
}

#[derive(Debug, Deserialize)]
struct TimedTextDocument {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<TimedTextSegment>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// Converts a `json3` document into captions. Events without text are skipped.
pub fn parse_json3(body: &str) -> Result<Vec<RawCaption>, DomainError> {
    let document: TimedTextDocument = serde_json::from_str(body).map_err(|err| {
        DomainError::transcript_unavailable(&format!("unreadable transcript: {err}"))
    })?;

    Ok(document
        .events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text = segs
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ");
            let text = text.trim();
            (!text.is_empty()).then(|| {
                RawCaption::new(
                    text,
                    event.t_start_ms as f64 / 1000.0,
                    event.d_duration_ms as f64 / 1000.0,
                )
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_become_captions_in_seconds() {
        let captions = parse_json3(
            r#"{"events":[
                {"tStartMs":0,"dDurationMs":1500,"segs":[{"utf8":"hello "},{"utf8":"there"}]},
                {"tStartMs":1500,"dDurationMs":2000},
                {"tStartMs":1500,"dDurationMs":900,"segs":[{"utf8":"general\nkenobi."}]}
            ]}"#,
        )
        .expect("valid document");

        assert_eq!(
            captions,
            vec![
                RawCaption::new("hello there", 0.0, 1.5),
                RawCaption::new("general kenobi.", 1.5, 0.9),
            ]
        );
    }

    #[test]
    fn whitespace_only_events_are_skipped() {
        let captions = parse_json3(
            r#"{"events":[{"tStartMs":0,"dDurationMs":10,"segs":[{"utf8":"\n"}]}]}"#,
        )
        .expect("valid document");
        assert!(captions.is_empty());
    }

    #[test]
    fn garbage_is_reported_as_unavailable() {
        let error = parse_json3("<html>consent</html>").expect_err("not json");
        assert!(error.is_transcript_unavailable());
    }
}
