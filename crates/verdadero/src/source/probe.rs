//! Video probing via ffprobe.
//!
//! Extracts the metadata the sampler and scorer need (dimensions,
//! duration, frame rate) by shelling out to ffprobe with JSON output.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::result::{DetectError, DetectResult};

/// Video stream metadata from ffprobe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoProbe {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Frame rate as a float
    pub fps: f64,
}

/// Build ffprobe command arguments for JSON output.
#[must_use]
pub fn build_ffprobe_args(video_path: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "quiet".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_format".to_string(),
        "-show_streams".to_string(),
        video_path.to_string_lossy().to_string(),
    ]
}

/// Probe a video file.
///
/// # Errors
///
/// Returns [`DetectError::Decode`] if ffprobe is missing, fails, or
/// reports no usable video stream.
pub fn probe_video(video_path: &Path) -> DetectResult<VideoProbe> {
    let args = build_ffprobe_args(video_path);

    let output = std::process::Command::new("ffprobe")
        .args(&args)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .output()
        .map_err(|e| DetectError::decode(format!("failed to execute ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DetectError::decode(format!(
            "ffprobe exited with {}: {stderr}",
            output.status
        )));
    }

    let json_str = String::from_utf8_lossy(&output.stdout);
    parse_ffprobe_json(&json_str)
}

/// Parse ffprobe JSON output into a [`VideoProbe`].
pub fn parse_ffprobe_json(json: &str) -> DetectResult<VideoProbe> {
    let parsed: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| DetectError::decode(format!("failed to parse ffprobe JSON: {e}")))?;

    let streams = parsed
        .get("streams")
        .and_then(|s| s.as_array())
        .ok_or_else(|| DetectError::decode("ffprobe output missing 'streams' array"))?;

    let video_stream = streams
        .iter()
        .find(|s| s.get("codec_type").and_then(|t| t.as_str()) == Some("video"))
        .ok_or_else(|| DetectError::decode("no video stream found"))?;

    let width = video_stream
        .get("width")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let height = video_stream
        .get("height")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let fps = video_stream
        .get("r_frame_rate")
        .and_then(|v| v.as_str())
        .map_or(0.0, parse_fps_fraction);

    // Stream duration first, container duration as fallback.
    let duration_secs = video_stream
        .get("duration")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| {
            parsed
                .get("format")
                .and_then(|f| f.get("duration"))
                .and_then(|v| v.as_str())
                .and_then(|s| s.parse::<f64>().ok())
        })
        .unwrap_or(0.0);

    if width == 0 || height == 0 {
        return Err(DetectError::decode("video stream reports zero dimensions"));
    }

    Ok(VideoProbe {
        width,
        height,
        duration_secs,
        fps,
    })
}

/// Parse an FPS fraction string like "24/1" or "30000/1001" into a float.
fn parse_fps_fraction(fraction: &str) -> f64 {
    let parts: Vec<&str> = fraction.split('/').collect();
    if parts.len() == 2 {
        let num: f64 = parts[0].parse().unwrap_or(0.0);
        let den: f64 = parts[1].parse().unwrap_or(1.0);
        if den > 0.0 {
            return num / den;
        }
    }
    fraction.parse().unwrap_or(0.0)
}
