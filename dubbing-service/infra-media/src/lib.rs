//! Adapters that drive the external media tools: `yt-dlp` for downloads,
//! `ffprobe` for durations and `ffmpeg` for encoding and muxing.

mod download;
mod export;
mod mux;
mod probe;
mod tool;

use std::path::PathBuf;

pub use download::YtDlpVideoFetcher;
pub use export::{write_wav, FfmpegAudioExporter};
pub use mux::FfmpegMuxer;
pub use probe::{parse_probe_output, FfprobeMediaProbe};
pub use tool::ToolError;

/// Locations of the media binaries and of the fixed working files.
#[derive(Debug, Clone)]
pub struct MediaToolsConfig {
    pub ytdlp_path: String,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub audio_format: String,
    pub work_dir: PathBuf,
    pub video_stem: String,
    pub audio_output: PathBuf,
    pub video_output: PathBuf,
}

impl MediaToolsConfig {
    /// Tool names resolved from `PATH` and the default working files under `work_dir`.
    pub fn with_work_dir(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            audio_format: "mp3".to_string(),
            audio_output: work_dir.join("merged_output.mp3"),
            video_output: work_dir.join("final_video.mp4"),
            video_stem: "downloaded_video".to_string(),
            work_dir,
        }
    }
}
