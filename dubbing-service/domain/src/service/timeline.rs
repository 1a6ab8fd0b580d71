use std::borrow::Cow;

use serde::Serialize;

use crate::{AudioSegment, SentenceCaption};

/// Where one synthesized clip landed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub index: usize,
    pub target_ms: u64,
    pub placed_ms: u64,
    pub duration_ms: u64,
    pub silence_before_ms: u64,
}

impl Placement {
    pub fn drift_ms(&self) -> u64 {
        self.placed_ms.saturating_sub(self.target_ms)
    }
}

/// Single dubbed audio track built by appending silence and synthesized clips.
///
/// The cursor is the end of the sample buffer, so it only moves forward. A
/// clip whose target onset already lies behind the cursor is appended right
/// away, so an overrunning clip pushes every following clip back until a gap
/// wide enough to absorb the drift comes along. Clips are never trimmed or
/// dropped.
#[derive(Debug, Clone)]
pub struct Timeline {
    audio: AudioSegment,
    placements: Vec<Placement>,
}

impl Timeline {
    pub fn new(sample_rate_hz: u32) -> Self {
        Self {
            audio: AudioSegment::empty(sample_rate_hz),
            placements: Vec::new(),
        }
    }

    pub fn current_time_ms(&self) -> u64 {
        self.audio.duration_ms()
    }

    pub fn duration_ms(&self) -> u64 {
        self.audio.duration_ms()
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.audio.sample_rate_hz()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn max_drift_ms(&self) -> u64 {
        self.placements
            .iter()
            .map(Placement::drift_ms)
            .max()
            .unwrap_or(0)
    }

    pub fn place(&mut self, target_start_ms: u64, segment: &AudioSegment) -> Placement {
        let rate = self.audio.sample_rate_hz();
        let segment = if segment.sample_rate_hz() == rate {
            Cow::Borrowed(segment)
        } else {
            Cow::Owned(segment.resampled(rate))
        };

        let target_sample = AudioSegment::sample_offset(target_start_ms, rate);
        let gap_samples = target_sample.saturating_sub(self.audio.len());
        self.audio.append_silence(gap_samples);

        let placement = Placement {
            index: self.placements.len(),
            target_ms: target_start_ms,
            placed_ms: self.current_time_ms(),
            duration_ms: segment.duration_ms(),
            silence_before_ms: AudioSegment::ms_at(gap_samples, rate),
        };

        self.audio.append(&segment);
        self.placements.push(placement);
        placement
    }

    /// Pads with trailing silence up to `target_duration_ms`. Never trims.
    /// Returns the amount of silence added.
    pub fn pad_to(&mut self, target_duration_ms: u64) -> u64 {
        let rate = self.audio.sample_rate_hz();
        let target_sample = AudioSegment::sample_offset(target_duration_ms, rate);
        let padding = target_sample.saturating_sub(self.audio.len());
        self.audio.append_silence(padding);
        AudioSegment::ms_at(padding, rate)
    }

    pub fn audio(&self) -> &AudioSegment {
        &self.audio
    }

    pub fn into_audio(self) -> AudioSegment {
        self.audio
    }
}

/// Places every clip at its sentence's onset, then pads to `target_duration_ms`.
pub fn assemble_timeline<'a, I>(pairs: I, target_duration_ms: u64, sample_rate_hz: u32) -> Timeline
where
    I: IntoIterator<Item = (&'a SentenceCaption, &'a AudioSegment)>,
{
    let mut timeline = Timeline::new(sample_rate_hz);
    for (sentence, segment) in pairs {
        timeline.place(sentence.start_ms(), segment);
    }
    timeline.pad_to(target_duration_ms);
    timeline
}
