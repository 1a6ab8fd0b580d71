use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dubbing_domain::TranslationFailurePolicy;

mod logging;

pub use logging::setup_logging;

pub type AppConfig = DubbingConfig;

const CONFIG_PREFIX: &str = "DUBBING_SERVICE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value `{value}` for {key}")]
    InvalidOverride { key: String, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DubbingConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub transcript: TranscriptConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    #[serde(default = "default_transcript_base_url")]
    pub base_url: String,
    #[serde(default = "default_transcript_language")]
    pub language: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_translation_base_url")]
    pub base_url: String,
    #[serde(default = "default_translation_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default)]
    pub failure_policy: TranslationFailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: String,
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,
    #[serde(default = "default_video_codec")]
    pub video_codec: String,
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    #[serde(default = "default_video_stem")]
    pub video_stem: String,
    #[serde(default = "default_audio_output")]
    pub audio_output: PathBuf,
    #[serde(default = "default_video_output")]
    pub video_output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_pipeline_name")]
    pub selected: String,
    #[serde(default = "default_pipeline_definitions")]
    pub definitions: HashMap<String, PipelineDefinitionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDefinitionConfig {
    #[serde(default)]
    pub steps: Vec<PipelineStepRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PipelineStepRef {
    Name(String),
    WithName { name: String },
}

impl PipelineStepRef {
    pub fn name(&self) -> &str {
        match self {
            PipelineStepRef::Name(name) => name,
            PipelineStepRef::WithName { name } => name,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            base_url: default_transcript_base_url(),
            language: default_transcript_language(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: default_translation_base_url(),
            timeout_ms: default_translation_timeout_ms(),
            source_lang: default_source_lang(),
            failure_policy: TranslationFailurePolicy::default(),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_tts_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            ffmpeg_path: default_ffmpeg_path(),
            ffprobe_path: default_ffprobe_path(),
            video_codec: default_video_codec(),
            audio_codec: default_audio_codec(),
            audio_format: default_audio_format(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: default_sample_rate(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            video_stem: default_video_stem(),
            audio_output: default_audio_output(),
            video_output: default_video_output(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            selected: default_pipeline_name(),
            definitions: default_pipeline_definitions(),
        }
    }
}

impl Default for PipelineDefinitionConfig {
    fn default() -> Self {
        Self::from_names(&[
            "transcript_fetch",
            "caption_segment",
            "sentence_dub",
            "video_fetch",
            "timeline_assemble",
            "audio_export",
            "media_mux",
        ])
    }
}

impl PipelineDefinitionConfig {
    pub fn from_names(names: &[&str]) -> Self {
        Self {
            steps: names
                .iter()
                .map(|name| PipelineStepRef::Name((*name).to_string()))
                .collect(),
        }
    }

    /// Dubs and exports the track without downloading or muxing the video.
    pub fn audio_only() -> Self {
        Self::from_names(&[
            "transcript_fetch",
            "caption_segment",
            "sentence_dub",
            "timeline_assemble",
            "audio_export",
        ])
    }
}

/// Loads `$DUBBING_SERVICE_CONFIG`, else `config/<RUN_ENV>.toml` when present,
/// else defaults. Environment overrides apply last.
pub fn load_config() -> Result<DubbingConfig, ConfigError> {
    let explicit = std::env::var(format!("{CONFIG_PREFIX}_CONFIG")).ok();
    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

    let mut config = match explicit {
        Some(path) => load_config_from_path(Path::new(&path))?,
        None => {
            let path = PathBuf::from("config").join(format!("{run_env}.toml"));
            if path.exists() {
                load_config_from_path(&path)?
            } else {
                DubbingConfig::default()
            }
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

pub fn load_config_from_path(path: &Path) -> Result<DubbingConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(content: &str) -> Result<DubbingConfig, toml::de::Error> {
    toml::from_str(content)
}

pub fn apply_env_overrides<F>(config: &mut DubbingConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(&format!("{CONFIG_PREFIX}_SERVER_HOST")) {
        config.server.host = host;
    }

    let port_key = format!("{CONFIG_PREFIX}_SERVER_PORT");
    if let Some(port) = lookup(&port_key) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidOverride {
                key: port_key.clone(),
                value: port.clone(),
            })?;
    }

    if let Some(level) = lookup(&format!("{CONFIG_PREFIX}_LOG_LEVEL")) {
        config.logging.level = level;
    }
    Ok(())
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_transcript_base_url() -> String {
    "https://www.youtube.com/api/timedtext".to_string()
}

fn default_transcript_language() -> String {
    "en".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_translation_base_url() -> String {
    "http://127.0.0.1:8090/translate".to_string()
}

fn default_translation_timeout_ms() -> u64 {
    120_000
}

fn default_source_lang() -> String {
    dubbing_domain::SOURCE_MODEL_LANGUAGE.to_string()
}

fn default_tts_base_url() -> String {
    "http://127.0.0.1:8091/synthesize".to_string()
}

fn default_ytdlp_path() -> String {
    "yt-dlp".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_format() -> String {
    "mp3".to_string()
}

fn default_sample_rate() -> u32 {
    24_000
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_video_stem() -> String {
    "downloaded_video".to_string()
}

fn default_audio_output() -> PathBuf {
    PathBuf::from("merged_output.mp3")
}

fn default_video_output() -> PathBuf {
    PathBuf::from("final_video.mp4")
}

fn default_pipeline_name() -> String {
    "default".to_string()
}

fn default_pipeline_definitions() -> HashMap<String, PipelineDefinitionConfig> {
    let mut definitions = HashMap::new();
    definitions.insert(default_pipeline_name(), PipelineDefinitionConfig::default());
    definitions.insert(
        "audio_only".to_string(),
        PipelineDefinitionConfig::audio_only(),
    );
    definitions
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn config_defaults_are_deterministic() {
        let cfg = DubbingConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.service.audio.sample_rate_hz, 24_000);
        assert_eq!(cfg.service.translation.source_lang, "en_XX");
        assert_eq!(
            cfg.service.translation.failure_policy,
            TranslationFailurePolicy::Fatal
        );
        assert_eq!(cfg.service.paths.video_stem, "downloaded_video");
        assert_eq!(cfg.service.paths.audio_output, PathBuf::from("merged_output.mp3"));
        assert_eq!(cfg.service.paths.video_output, PathBuf::from("final_video.mp4"));
        assert_eq!(cfg.service.media.audio_format, "mp3");
    }

    #[test]
    fn default_pipeline_lists_every_step_in_order() {
        let cfg = DubbingConfig::default();
        let definition = &cfg.service.pipeline.definitions[&cfg.service.pipeline.selected];
        let names: Vec<&str> = definition.steps.iter().map(PipelineStepRef::name).collect();
        assert_eq!(
            names,
            vec![
                "transcript_fetch",
                "caption_segment",
                "sentence_dub",
                "video_fetch",
                "timeline_assemble",
                "audio_export",
                "media_mux",
            ]
        );
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let cfg = parse_config(
            r#"
            [server]
            port = 9000

            [service.translation]
            failure_policy = "passthrough"

            [service.pipeline]
            selected = "custom"

            [service.pipeline.definitions.custom]
            steps = ["transcript_fetch", { name = "caption_segment" }]
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(
            cfg.service.translation.failure_policy,
            TranslationFailurePolicy::Passthrough
        );
        let custom = &cfg.service.pipeline.definitions["custom"];
        assert_eq!(custom.steps[1].name(), "caption_segment");
        assert_eq!(cfg.service.tts.timeout_ms, 30_000);
    }

    #[test]
    fn file_is_loaded_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[service.audio]\nsample_rate_hz = 16000").expect("write config");

        let cfg = load_config_from_path(file.path()).expect("config loads");
        assert_eq!(cfg.service.audio.sample_rate_hz, 16_000);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = load_config_from_path(Path::new("/definitely/not/here.toml"))
            .expect_err("missing file");
        assert!(error.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn env_overrides_replace_server_and_log_settings() {
        let mut cfg = DubbingConfig::default();
        let vars = HashMap::from([
            ("DUBBING_SERVICE_SERVER_HOST", "0.0.0.0"),
            ("DUBBING_SERVICE_SERVER_PORT", "5000"),
            ("DUBBING_SERVICE_LOG_LEVEL", "debug"),
        ]);

        apply_env_overrides(&mut cfg, |key| vars.get(key).map(|value| value.to_string()))
            .expect("overrides apply");

        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn invalid_port_override_is_rejected() {
        let mut cfg = DubbingConfig::default();
        let error = apply_env_overrides(&mut cfg, |key| {
            (key == "DUBBING_SERVICE_SERVER_PORT").then(|| "eighty".to_string())
        })
        .expect_err("invalid port");
        assert!(matches!(error, ConfigError::InvalidOverride { .. }));
    }
}
