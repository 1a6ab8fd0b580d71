use std::ffi::OsStr;
use std::path::Path;

use async_trait::async_trait;
use dubbing_domain::{DomainError, MediaProbePort};
use serde_json::Value;

use crate::tool::run_tool;

const SERVICE: &str = "ffprobe";

pub struct FfprobeMediaProbe {
    program: String,
}

impl FfprobeMediaProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl MediaProbePort for FfprobeMediaProbe {
    async fn duration_ms(&self, path: &Path) -> Result<u64, DomainError> {
        let args: [&OsStr; 6] = [
            OsStr::new("-v"),
            OsStr::new("quiet"),
            OsStr::new("-print_format"),
            OsStr::new("json"),
            OsStr::new("-show_format"),
            path.as_os_str(),
        ];
        let stdout = run_tool(&self.program, args)
            .await
            .map_err(|err| DomainError::external_service_error(SERVICE, &err.to_string()))?;

        let duration_ms = parse_probe_output(&stdout)?;
        tracing::debug!(path = %path.display(), duration_ms, "media probed");
        Ok(duration_ms)
    }
}

/// Reads `format.duration` (seconds, as a string) from ffprobe JSON output.
pub fn parse_probe_output(stdout: &str) -> Result<u64, DomainError> {
    let json: Value = serde_json::from_str(stdout).map_err(|err| {
        DomainError::external_service_error(SERVICE, &format!("invalid probe output: {err}"))
    })?;

    let seconds = json
        .get("format")
        .and_then(|format| format.get("duration"))
        .and_then(|duration| match duration {
            Value::String(text) => text.trim().parse::<f64>().ok(),
            Value::Number(number) => number.as_f64(),
            _ => None,
        })
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .ok_or_else(|| DomainError::external_service_error(SERVICE, "probe output has no duration"))?;

    Ok((seconds * 1000.0) as u64)
}
