use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dubbing_domain::{DomainError, DownloadedVideo, MediaMuxPort};

use crate::tool::run_tool;
use crate::MediaToolsConfig;

const SERVICE: &str = "ffmpeg";

/// Replaces the audio track of the downloaded video with the dubbed track.
pub struct FfmpegMuxer {
    program: String,
    video_codec: String,
    audio_codec: String,
    output: PathBuf,
}

impl FfmpegMuxer {
    pub fn new(config: &MediaToolsConfig) -> Self {
        Self {
            program: config.ffmpeg_path.clone(),
            video_codec: config.video_codec.clone(),
            audio_codec: config.audio_codec.clone(),
            output: config.video_output.clone(),
        }
    }

    fn args(&self, video: &DownloadedVideo, audio: &Path) -> Vec<OsString> {
        vec![
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            video.path.as_os_str().to_owned(),
            "-i".into(),
            audio.as_os_str().to_owned(),
            "-map".into(),
            "0:v:0".into(),
            "-map".into(),
            "1:a:0".into(),
            "-t".into(),
            seconds(video.duration_ms).into(),
            "-c:v".into(),
            self.video_codec.as_str().into(),
            "-c:a".into(),
            self.audio_codec.as_str().into(),
            "-y".into(),
            self.output.clone().into_os_string(),
        ]
    }
}

#[async_trait]
impl MediaMuxPort for FfmpegMuxer {
    async fn mux(&self, video: &DownloadedVideo, audio: &Path) -> Result<PathBuf, DomainError> {
        tracing::info!(
            video = %video.path.display(),
            audio = %audio.display(),
            duration_ms = video.duration_ms,
            "muxing dubbed audio"
        );
        run_tool(&self.program, self.args(video, audio))
            .await
            .map_err(|err| {
                DomainError::external_service_error(
                    SERVICE,
                    &format!("Error merging video and audio: {err}"),
                )
            })?;

        tracing::info!(path = %self.output.display(), "dubbed video written");
        Ok(self.output.clone())
    }
}

fn seconds(duration_ms: u64) -> String {
    format!("{}.{:03}", duration_ms / 1000, duration_ms % 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> DownloadedVideo {
        DownloadedVideo {
            path: PathBuf::from("/tmp/dub/downloaded_video.webm"),
            duration_ms: 61_005,
        }
    }

    #[test]
    fn audio_is_clipped_to_video_duration() {
        let muxer = FfmpegMuxer::new(&MediaToolsConfig::with_work_dir("/tmp/dub"));

        let args = muxer.args(&video(), Path::new("/tmp/dub/merged_output.mp3"));

        let rendered: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            rendered.join(" "),
            "-loglevel error -i /tmp/dub/downloaded_video.webm -i /tmp/dub/merged_output.mp3 \
             -map 0:v:0 -map 1:a:0 -t 61.005 -c:v libx264 -c:a aac -y /tmp/dub/final_video.mp4"
        );
    }

    #[test]
    fn seconds_keep_millisecond_precision() {
        assert_eq!(seconds(0), "0.000");
        assert_eq!(seconds(1_200), "1.200");
    }

    #[tokio::test]
    async fn failure_is_reported_as_merge_error() {
        let mut config = MediaToolsConfig::with_work_dir("/tmp/dub");
        config.ffmpeg_path = "/nonexistent/ffmpeg".to_string();
        let muxer = FfmpegMuxer::new(&config);

        let error = muxer
            .mux(&video(), Path::new("/tmp/dub/merged_output.mp3"))
            .await
            .expect_err("tool missing");

        assert!(error.to_string().contains("Error merging video and audio: "));
    }
}
