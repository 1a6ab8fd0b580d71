use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TargetLanguage;

/// One timed transcript fragment, as delivered by the transcript source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCaption {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl RawCaption {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// One or more raw captions merged up to a sentence terminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceCaption {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl SentenceCaption {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// Target onset on the dubbed timeline, truncated to whole milliseconds.
    pub fn start_ms(&self) -> u64 {
        (self.start.max(0.0) * 1000.0) as u64
    }
}

/// Mono PCM audio. Duration is derived from the sample count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSegment {
    sample_rate_hz: u32,
    samples: Vec<f32>,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate_hz: u32) -> Self {
        Self {
            sample_rate_hz: sample_rate_hz.max(1),
            samples,
        }
    }

    pub fn empty(sample_rate_hz: u32) -> Self {
        Self::new(Vec::new(), sample_rate_hz)
    }

    /// Silence lasting exactly `duration_ms` once measured with [`AudioSegment::duration_ms`].
    pub fn silent(duration_ms: u64, sample_rate_hz: u32) -> Self {
        let sample_rate_hz = sample_rate_hz.max(1);
        let sample_count = Self::sample_offset(duration_ms, sample_rate_hz);
        Self::new(vec![0.0; sample_count], sample_rate_hz)
    }

    /// First sample index whose timestamp, truncated to milliseconds, is `ms`.
    pub fn sample_offset(ms: u64, sample_rate_hz: u32) -> usize {
        (ms * u64::from(sample_rate_hz.max(1))).div_ceil(1000) as usize
    }

    /// Millisecond timestamp of `sample_index`, truncated.
    pub fn ms_at(sample_index: usize, sample_rate_hz: u32) -> u64 {
        sample_index as u64 * 1000 / u64::from(sample_rate_hz.max(1))
    }

    pub fn append_silence(&mut self, sample_count: usize) {
        self.samples.resize(self.samples.len() + sample_count, 0.0);
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        Self::ms_at(self.samples.len(), self.sample_rate_hz)
    }

    /// Appends `other`, resampling it first when the rates differ.
    pub fn append(&mut self, other: &AudioSegment) {
        if other.sample_rate_hz == self.sample_rate_hz {
            self.samples.extend_from_slice(&other.samples);
        } else {
            let converted = other.resampled(self.sample_rate_hz);
            self.samples.extend(converted.samples);
        }
    }

    pub fn resampled(&self, target_rate_hz: u32) -> AudioSegment {
        let target_rate_hz = target_rate_hz.max(1);
        AudioSegment::new(
            resample_linear(&self.samples, self.sample_rate_hz, target_rate_hz),
            target_rate_hz,
        )
    }
}

fn resample_linear(samples: &[f32], source_rate_hz: u32, target_rate_hz: u32) -> Vec<f32> {
    if source_rate_hz == target_rate_hz || samples.len() <= 1 {
        return samples.to_vec();
    }

    let output_len = ((samples.len() as u64 * target_rate_hz as u64) / source_rate_hz as u64)
        .max(1) as usize;
    if output_len <= 1 {
        return vec![samples[0]];
    }

    let mut output = Vec::with_capacity(output_len);
    let max_source_idx = samples.len() - 1;

    for out_idx in 0..output_len {
        let source_pos = out_idx as f64 * source_rate_hz as f64 / target_rate_hz as f64;
        let left_idx = (source_pos.floor() as usize).min(max_source_idx);
        let right_idx = (left_idx + 1).min(max_source_idx);
        let frac = (source_pos - left_idx as f64) as f32;

        let left = samples[left_idx];
        let right = samples[right_idx];
        output.push(left * (1.0 - frac) + right * frac);
    }

    output
}

/// Result of synthesizing one sentence. Failures degrade to silence instead of aborting.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisOutcome {
    Spoken(AudioSegment),
    Silent { reason: String },
}

impl SynthesisOutcome {
    pub fn is_silent(&self) -> bool {
        matches!(self, SynthesisOutcome::Silent { .. })
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            SynthesisOutcome::Spoken(segment) => segment.duration_ms(),
            SynthesisOutcome::Silent { .. } => 0,
        }
    }

    pub fn segment(&self) -> Option<&AudioSegment> {
        match self {
            SynthesisOutcome::Spoken(segment) => Some(segment),
            SynthesisOutcome::Silent { .. } => None,
        }
    }

    /// Zero-length placeholder for silent outcomes.
    pub fn into_segment(self, sample_rate_hz: u32) -> AudioSegment {
        match self {
            SynthesisOutcome::Spoken(segment) => segment,
            SynthesisOutcome::Silent { .. } => AudioSegment::empty(sample_rate_hz),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DubbedSentence {
    pub sentence: SentenceCaption,
    pub translated_text: String,
    pub outcome: SynthesisOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedVideo {
    pub path: PathBuf,
    pub duration_ms: u64,
}

/// Per-request state threaded through every pipeline stage.
#[derive(Debug, Clone)]
pub struct DubbingContext {
    pub session_id: String,
    pub video_url: String,
    pub video_id: String,
    pub target_language: TargetLanguage,
    pub sample_rate_hz: u32,
    pub raw_captions: Vec<RawCaption>,
    pub sentences: Vec<SentenceCaption>,
    pub dubbed: Vec<DubbedSentence>,
    pub video: Option<DownloadedVideo>,
    pub timeline: Option<AudioSegment>,
    pub audio_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub extensions: HashMap<String, Value>,
}

impl DubbingContext {
    pub fn new(
        session_id: impl Into<String>,
        video_url: impl Into<String>,
        video_id: impl Into<String>,
        target_language: TargetLanguage,
        sample_rate_hz: u32,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            video_url: video_url.into(),
            video_id: video_id.into(),
            target_language,
            sample_rate_hz,
            raw_captions: Vec::new(),
            sentences: Vec::new(),
            dubbed: Vec::new(),
            video: None,
            timeline: None,
            audio_path: None,
            output_path: None,
            extensions: HashMap::new(),
        }
    }

    pub fn set_extension(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.extensions.insert(key.into(), value)
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    pub fn silent_sentence_count(&self) -> usize {
        self.dubbed
            .iter()
            .filter(|dubbed| dubbed.outcome.is_silent())
            .count()
    }
}
