//! Pixel Buffer Source: decoded frames and media metadata.
//!
//! Images decode to exactly one [`PixelBuffer`] at native resolution via
//! the `image` crate. Videos are probed with ffprobe, then N evenly spaced
//! frames are extracted with ffmpeg, in chronological order.
//!
//! # Usage
//!
//! ```text
//! image bytes ──→ decode_image ─────────────→ PixelBuffer
//! video path ──→ probe_video ──→ sample_video_frames ──→ Vec<PixelBuffer>
//! ```

pub mod frames;
pub mod probe;

pub use frames::{sample_timestamps, sample_video_frames, DEFAULT_FRAME_COUNT};
pub use probe::{build_ffprobe_args, parse_ffprobe_json, probe_video, VideoProbe};

use serde::{Deserialize, Serialize};

use crate::pixel::PixelBuffer;
use crate::result::{DetectError, DetectResult};

/// Declared media category of a submitted asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Video clip
    Video,
}

impl MediaKind {
    /// Classify a declared MIME type.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::UnsupportedType`] for anything outside
    /// `image/*` and `video/*`.
    pub fn from_mime(mime: &str) -> DetectResult<Self> {
        if mime.starts_with("image/") {
            Ok(Self::Image)
        } else if mime.starts_with("video/") {
            Ok(Self::Video)
        } else {
            Err(DetectError::UnsupportedType {
                mime: mime.to_string(),
            })
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Coarse file metadata consumed by the scorer. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Original filename (used only for keyword checks)
    pub filename: String,
    /// File size in bytes
    pub byte_size: u64,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Declared media category
    pub kind: MediaKind,
    /// Clip duration in seconds (video only)
    pub duration_secs: Option<f64>,
}

impl MediaMetadata {
    /// Total pixel count.
    #[must_use]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Width over height; 0 when height is unknown.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Decode an image asset into one RGBA buffer at native resolution.
///
/// # Errors
///
/// Returns [`DetectError::Decode`] if the bytes cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> DetectResult<PixelBuffer> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| DetectError::decode(format!("image decode failed: {e}")))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}
