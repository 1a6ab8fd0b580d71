use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dubbing_domain::{AudioExportPort, AudioSegment, DomainError};

use crate::tool::run_tool;
use crate::MediaToolsConfig;

const SERVICE: &str = "ffmpeg";

/// Writes the timeline as WAV and encodes it to the configured format.
pub struct FfmpegAudioExporter {
    program: String,
    format: String,
    output: PathBuf,
}

impl FfmpegAudioExporter {
    pub fn new(config: &MediaToolsConfig) -> Self {
        Self {
            program: config.ffmpeg_path.clone(),
            format: config.audio_format.clone(),
            output: config.audio_output.clone(),
        }
    }

    fn intermediate_path(&self) -> PathBuf {
        self.output.with_extension("export.wav")
    }

    fn args(&self, wav: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            wav.as_os_str().to_owned(),
            "-f".into(),
            self.format.as_str().into(),
            self.output.clone().into_os_string(),
        ]
    }
}

#[async_trait]
impl AudioExportPort for FfmpegAudioExporter {
    async fn export(&self, audio: &AudioSegment) -> Result<PathBuf, DomainError> {
        let wav = self.intermediate_path();
        write_wav(&wav, audio)?;

        let encoded = run_tool(&self.program, self.args(&wav)).await;
        if let Err(err) = tokio::fs::remove_file(&wav).await {
            tracing::warn!(path = %wav.display(), error = %err, "failed to remove intermediate wav");
        }
        encoded.map_err(|err| {
            DomainError::external_service_error(SERVICE, &format!("Error exporting audio: {err}"))
        })?;

        tracing::info!(
            path = %self.output.display(),
            format = %self.format,
            duration_ms = audio.duration_ms(),
            "audio exported"
        );
        Ok(self.output.clone())
    }
}

/// Writes `audio` as 16-bit mono PCM.
pub fn write_wav(path: &Path, audio: &AudioSegment) -> Result<(), DomainError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate_hz(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let wav_error = |err: hound::Error| {
        DomainError::internal_error(&format!("failed to write {}: {err}", path.display()))
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(wav_error)?;
    for &sample in audio.samples() {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16;
        writer.write_sample(value).map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)
}
