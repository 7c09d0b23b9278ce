//! Video duration probing via an `ffprobe` subprocess.
//!
//! Only the container-level duration is read; no decoding happens.

use log::info;
use std::process::{Command, Stdio};

use crate::media::MediaError;

/// Read the duration of a video file, in seconds.
pub fn probe_duration(video_path: &str) -> Result<f64, MediaError> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            video_path,
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| MediaError::Probe(format!("failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::Probe(format!(
            "ffprobe failed: {}",
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let duration: f64 = stdout
        .trim()
        .parse()
        .map_err(|_| MediaError::Probe(format!("unexpected ffprobe output: {}", stdout.trim())))?;

    info!("Probed video duration: {duration:.2}s for {video_path}");
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_video_file_is_a_probe_error() {
        let err = probe_duration("/nonexistent/video.mp4").unwrap_err();
        assert!(matches!(err, MediaError::Probe(_)));
    }
}
