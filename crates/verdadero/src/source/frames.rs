//! Evenly spaced video frame sampling via ffmpeg.
//!
//! Frames are captured sequentially (seek, capture, advance) because the
//! decode cursor is external state; each timestamp is visited exactly
//! once, in chronological order. Any seek or decode failure is fatal for
//! the asset; partial frame sets are never returned.

use std::path::Path;

use super::{decode_image, probe::probe_video};
use crate::pixel::PixelBuffer;
use crate::result::{DetectError, DetectResult};

/// Default number of frames sampled per video.
pub const DEFAULT_FRAME_COUNT: usize = 5;

/// Midpoint-spaced sample timestamps across a clip.
///
/// Returns `frame_count` strictly increasing timestamps, none repeated,
/// covering the duration evenly.
#[must_use]
pub fn sample_timestamps(duration_secs: f64, frame_count: usize) -> Vec<f64> {
    (0..frame_count)
        .map(|i| duration_secs * (i as f64 + 0.5) / frame_count as f64)
        .collect()
}

/// Build the ffmpeg invocation for one frame capture.
#[must_use]
pub fn build_ffmpeg_frame_args(video_path: &Path, timestamp: f64) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-ss".to_string(),
        format!("{timestamp:.3}"),
        "-i".to_string(),
        video_path.to_string_lossy().to_string(),
        "-frames:v".to_string(),
        "1".to_string(),
        "-f".to_string(),
        "image2pipe".to_string(),
        "-vcodec".to_string(),
        "png".to_string(),
        "-".to_string(),
    ]
}

/// Sample `frame_count` evenly spaced frames from a video asset.
///
/// Returns the probe alongside the frames so callers keep the clip
/// metadata without probing twice.
///
/// # Errors
///
/// Returns [`DetectError::Decode`] when the probe fails, the clip has no
/// measurable duration, or any single capture fails.
pub fn sample_video_frames(
    video_path: &Path,
    frame_count: usize,
) -> DetectResult<(super::VideoProbe, Vec<PixelBuffer>)> {
    let probe = probe_video(video_path)?;
    if probe.duration_secs <= 0.0 {
        return Err(DetectError::decode(
            "video reports no measurable duration",
        ));
    }
    if frame_count == 0 {
        return Err(DetectError::decode("frame count must be at least 1"));
    }

    let timestamps = sample_timestamps(probe.duration_secs, frame_count);
    tracing::debug!(
        path = %video_path.display(),
        frames = frame_count,
        duration = probe.duration_secs,
        "sampling video frames"
    );

    let mut buffers = Vec::with_capacity(frame_count);
    for timestamp in timestamps {
        buffers.push(capture_frame(video_path, timestamp)?);
    }
    Ok((probe, buffers))
}

/// Capture one frame at the given timestamp as a decoded buffer.
fn capture_frame(video_path: &Path, timestamp: f64) -> DetectResult<PixelBuffer> {
    let args = build_ffmpeg_frame_args(video_path, timestamp);

    let output = std::process::Command::new("ffmpeg")
        .args(&args)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .output()
        .map_err(|e| DetectError::decode(format!("failed to execute ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DetectError::decode(format!(
            "ffmpeg seek at {timestamp:.3}s exited with {}: {stderr}",
            output.status
        )));
    }

    if output.stdout.is_empty() {
        return Err(DetectError::decode(format!(
            "ffmpeg produced no frame at {timestamp:.3}s"
        )));
    }

    decode_image(&output.stdout)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_evenly_spaced() {
        let ts = sample_timestamps(10.0, 5);
        assert_eq!(ts.len(), 5);
        assert!((ts[0] - 1.0).abs() < 1e-9);
        assert!((ts[4] - 9.0).abs() < 1e-9);
        for pair in ts.windows(2) {
            assert!((pair[1] - pair[0] - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_timestamps_strictly_increasing() {
        let ts = sample_timestamps(3.2, 7);
        for pair in ts.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_single_timestamp_is_midpoint() {
        let ts = sample_timestamps(8.0, 1);
        assert_eq!(ts.len(), 1);
        assert!((ts[0] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_ffmpeg_args_shape() {
        let args = build_ffmpeg_frame_args(Path::new("/tmp/clip.mp4"), 1.5);
        assert_eq!(args[2], "-ss");
        assert_eq!(args[3], "1.500");
        assert_eq!(args[5], "/tmp/clip.mp4");
        assert_eq!(args.last().unwrap(), "-");
        assert!(args.contains(&"image2pipe".to_string()));
    }

    #[test]
    fn test_missing_video_fails() {
        let result = sample_video_frames(Path::new("/nonexistent/clip.mp4"), 5);
        assert!(result.is_err());
    }
}
