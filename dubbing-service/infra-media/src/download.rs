use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use dubbing_domain::{DomainError, VideoFetchPort};

use crate::tool::run_tool;
use crate::MediaToolsConfig;

const SERVICE: &str = "ytdlp";

/// Downloads a single video with `yt-dlp` into the working directory.
pub struct YtDlpVideoFetcher {
    program: String,
    output_template: PathBuf,
    fallback_path: PathBuf,
}

impl YtDlpVideoFetcher {
    pub fn new(config: &MediaToolsConfig) -> Self {
        let output_template = config
            .work_dir
            .join(format!("{}.%(ext)s", config.video_stem));
        let fallback_path = config.work_dir.join(format!("{}.mp4", config.video_stem));
        Self {
            program: config.ytdlp_path.clone(),
            output_template,
            fallback_path,
        }
    }

    fn args(&self, url: &str) -> Vec<OsString> {
        vec![
            "--no-playlist".into(),
            "--restrict-filenames".into(),
            "-o".into(),
            self.output_template.clone().into_os_string(),
            "--print".into(),
            "after_move:filepath".into(),
            url.into(),
        ]
    }
}

#[async_trait]
impl VideoFetchPort for YtDlpVideoFetcher {
    async fn download(&self, url: &str) -> Result<PathBuf, DomainError> {
        tracing::info!(url, "downloading video");
        let stdout = run_tool(&self.program, self.args(url))
            .await
            .map_err(|err| {
                DomainError::external_service_error(
                    SERVICE,
                    &format!("Error downloading video: {err}"),
                )
            })?;

        let path = printed_path(&stdout).unwrap_or_else(|| self.fallback_path.clone());
        tracing::info!(path = %path.display(), "video downloaded");
        Ok(path)
    }
}

/// Last non-empty line of the tool output, which is the final file path.
fn printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_restrict_download_to_one_named_file() {
        let fetcher = YtDlpVideoFetcher::new(&MediaToolsConfig::with_work_dir("/tmp/dub"));

        let args = fetcher.args("https://www.youtube.com/watch?v=abc");

        assert_eq!(
            args,
            vec![
                OsString::from("--no-playlist"),
                "--restrict-filenames".into(),
                "-o".into(),
                "/tmp/dub/downloaded_video.%(ext)s".into(),
                "--print".into(),
                "after_move:filepath".into(),
                "https://www.youtube.com/watch?v=abc".into(),
            ]
        );
    }

    #[test]
    fn printed_path_takes_the_last_line() {
        let stdout = "[download] 100%\n/tmp/dub/downloaded_video.webm\n\n";
        assert_eq!(
            printed_path(stdout),
            Some(PathBuf::from("/tmp/dub/downloaded_video.webm"))
        );
        assert_eq!(printed_path("  \n"), None);
    }

    #[tokio::test]
    async fn failure_is_reported_as_download_error() {
        let mut config = MediaToolsConfig::with_work_dir("/tmp/dub");
        config.ytdlp_path = "/nonexistent/yt-dlp".to_string();
        let fetcher = YtDlpVideoFetcher::new(&config);

        let error = fetcher
            .download("https://www.youtube.com/watch?v=abc")
            .await
            .expect_err("tool missing");

        assert!(error.to_string().contains("Error downloading video: "));
    }
}
