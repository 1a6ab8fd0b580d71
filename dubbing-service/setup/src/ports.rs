use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use dubbing_configuration::AppConfig;
use dubbing_domain::{
    AudioExportPort, MediaMuxPort, MediaProbePort, SpeechSynthesisPort, TranscriptPort,
    TranslationPort, VideoFetchPort,
};
use dubbing_infra_media::{
    FfmpegAudioExporter, FfmpegMuxer, FfprobeMediaProbe, MediaToolsConfig, YtDlpVideoFetcher,
};
use dubbing_infra_transcript::{TimedTextConfig, TimedTextTranscriptAdapter};
use dubbing_infra_translation_rest::{RestTranslationAdapter, RestTranslatorConfig};
use dubbing_infra_tts_rest::{RestSpeechSynthesisAdapter, RestTtsConfig};

/// Every outbound adapter the pipeline stages draw from, built once at startup.
#[derive(Clone)]
pub struct ServicePorts {
    pub transcripts: Arc<dyn TranscriptPort>,
    pub translator: Arc<dyn TranslationPort>,
    pub synthesizer: Arc<dyn SpeechSynthesisPort>,
    pub video_fetcher: Arc<dyn VideoFetchPort>,
    pub probe: Arc<dyn MediaProbePort>,
    pub exporter: Arc<dyn AudioExportPort>,
    pub muxer: Arc<dyn MediaMuxPort>,
}

impl ServicePorts {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let service = &config.service;

        let transcripts = TimedTextTranscriptAdapter::new(TimedTextConfig {
            base_url: service.transcript.base_url.clone(),
            language: service.transcript.language.clone(),
            timeout: Duration::from_millis(service.transcript.timeout_ms),
        })
        .map_err(|err| anyhow!("failed to build transcript adapter: {err}"))?;

        let translator = RestTranslationAdapter::new(RestTranslatorConfig {
            base_url: service.translation.base_url.clone(),
            source_lang: service.translation.source_lang.clone(),
            timeout: Duration::from_millis(service.translation.timeout_ms),
        })
        .map_err(|err| anyhow!("failed to build translation adapter: {err}"))?;

        let synthesizer = RestSpeechSynthesisAdapter::new(RestTtsConfig {
            base_url: service.tts.base_url.clone(),
            timeout: Duration::from_millis(service.tts.timeout_ms),
            sample_rate_hz: service.audio.sample_rate_hz,
        })
        .map_err(|err| anyhow!("failed to build tts adapter: {err}"))?;

        let media = media_tools_config(config);
        Ok(Self {
            transcripts: Arc::new(transcripts),
            translator: Arc::new(translator),
            synthesizer: Arc::new(synthesizer),
            video_fetcher: Arc::new(YtDlpVideoFetcher::new(&media)),
            probe: Arc::new(FfprobeMediaProbe::new(media.ffprobe_path.clone())),
            exporter: Arc::new(FfmpegAudioExporter::new(&media)),
            muxer: Arc::new(FfmpegMuxer::new(&media)),
        })
    }
}

pub fn media_tools_config(config: &AppConfig) -> MediaToolsConfig {
    let media = &config.service.media;
    let paths = &config.service.paths;
    MediaToolsConfig {
        ytdlp_path: media.ytdlp_path.clone(),
        ffmpeg_path: media.ffmpeg_path.clone(),
        ffprobe_path: media.ffprobe_path.clone(),
        video_codec: media.video_codec.clone(),
        audio_codec: media.audio_codec.clone(),
        audio_format: media.audio_format.clone(),
        work_dir: paths.work_dir.clone(),
        video_stem: paths.video_stem.clone(),
        audio_output: resolve(&paths.work_dir, &paths.audio_output),
        video_output: resolve(&paths.work_dir, &paths.video_output),
    }
}

/// Relative output paths live under the working directory.
fn resolve(work_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        work_dir.join(path)
    }
}
