use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use dubbing_domain::{AudioSegment, DomainError, SpeechSynthesisPort, TargetLanguage};
use serde::Serialize;

const SERVICE: &str = "tts";

#[derive(Debug, Clone)]
pub struct RestTtsConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub sample_rate_hz: u32,
}

/// Posts text to a speech engine and decodes the WAV it answers with.
pub struct RestSpeechSynthesisAdapter {
    client: reqwest::Client,
    config: RestTtsConfig,
}

#[derive(Debug, Serialize)]
struct SynthesizeBody<'a> {
    text: &'a str,
    lang: &'a str,
    slow: bool,
}

impl RestSpeechSynthesisAdapter {
    pub fn new(config: RestTtsConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                DomainError::internal_error(&format!("failed to build tts client: {err}"))
            })?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SpeechSynthesisPort for RestSpeechSynthesisAdapter {
    async fn synthesize(
        &self,
        text: &str,
        language: TargetLanguage,
    ) -> Result<AudioSegment, DomainError> {
        let response = self
            .client
            .post(&self.config.base_url)
            .json(&SynthesizeBody {
                text,
                lang: language.speech_code(),
                slow: false,
            })
            .send()
            .await
            .map_err(|err| {
                DomainError::external_service_error(SERVICE, &format!("request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::external_service_error(
                SERVICE,
                &format!("speech engine answered {status}"),
            ));
        }

        let bytes = response.bytes().await.map_err(|err| {
            DomainError::external_service_error(SERVICE, &format!("failed to read audio: {err}"))
        })?;
        let clip = decode_wav(&bytes)?;
        let clip = if clip.sample_rate_hz() == self.config.sample_rate_hz {
            clip
        } else {
            clip.resampled(self.config.sample_rate_hz)
        };

        tracing::debug!(
            lang = language.speech_code(),
            duration_ms = clip.duration_ms(),
            "speech synthesized"
        );
        Ok(clip)
    }
}

/// Decodes a PCM WAV payload to mono `f32`, averaging channels.
pub fn decode_wav(bytes: &[u8]) -> Result<AudioSegment, DomainError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).map_err(|err| {
        DomainError::external_service_error(SERVICE, &format!("invalid WAV payload: {err}"))
    })?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(wav_error)?,
        hound::SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(wav_error)?
        }
    };

    let mono = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    };
    Ok(AudioSegment::new(mono, spec.sample_rate))
}

fn wav_error(err: hound::Error) -> DomainError {
    DomainError::external_service_error(SERVICE, &format!("corrupt WAV samples: {err}"))
}
