//! Skin-tone region estimate.
//!
//! Scans a circular region centered in the frame (radius `min(w,h)/4`) and
//! reports the skin-toned fraction, rescaled into [0, 100]. A pixel is
//! skin-toned when either the RGB heuristic or the YCbCr range check
//! matches. Faces cluster in the frame center for portrait-style media,
//! which is what manipulated face media overwhelmingly is.

use super::config::SkinThresholds;
use crate::pixel::PixelBuffer;

/// RGB heuristic lower bounds: R, G, B minimums and channel spread.
pub const SKIN_RGB_MIN: [f64; 3] = [95.0, 40.0, 20.0];
/// Minimum max-min channel spread for the RGB heuristic.
pub const SKIN_RGB_SPREAD_MIN: f64 = 15.0;
/// Inclusive Cb range for the YCbCr heuristic.
pub const SKIN_CB_RANGE: (f64, f64) = (77.0, 127.0);
/// Inclusive Cr range for the YCbCr heuristic.
pub const SKIN_CR_RANGE: (f64, f64) = (133.0, 173.0);

/// Fraction of the circular center region classified as skin, scaled.
#[must_use]
pub fn skin_ratio(buffer: &PixelBuffer, config: &SkinThresholds) -> f64 {
    let width = buffer.width();
    let height = buffer.height();
    if width == 0 || height == 0 {
        return 0.0;
    }

    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;
    let radius = f64::from(width.min(height)) / 4.0;
    let radius_sq = radius * radius;

    let mut region_pixels = 0u64;
    let mut skin_pixels = 0u64;

    for y in 0..height {
        for x in 0..width {
            let dx = (f64::from(x) + 0.5) - cx;
            let dy = (f64::from(y) + 0.5) - cy;
            if dx * dx + dy * dy > radius_sq {
                continue;
            }
            region_pixels += 1;
            let rgb = buffer.rgb_f64(x, y);
            if is_skin_rgb(rgb) || is_skin_ycbcr(rgb) {
                skin_pixels += 1;
            }
        }
    }

    if region_pixels == 0 {
        return 0.0;
    }

    let ratio = skin_pixels as f64 / region_pixels as f64;
    (ratio * config.scale).min(100.0)
}

/// RGB skin heuristic: warm, red-dominant pixels with real channel spread.
fn is_skin_rgb([r, g, b]: [f64; 3]) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > SKIN_RGB_MIN[0]
        && g > SKIN_RGB_MIN[1]
        && b > SKIN_RGB_MIN[2]
        && (max - min) > SKIN_RGB_SPREAD_MIN
        && r > g
        && r > b
}

/// YCbCr skin heuristic over the BT.601 chroma planes.
fn is_skin_ycbcr([r, g, b]: [f64; 3]) -> bool {
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    cb >= SKIN_CB_RANGE.0 && cb <= SKIN_CB_RANGE.1 && cr >= SKIN_CR_RANGE.0 && cr <= SKIN_CR_RANGE.1
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKIN_TONE: [u8; 4] = [210, 150, 120, 255];

    #[test]
    fn test_uniform_gray_is_not_skin() {
        let buffer = PixelBuffer::filled(64, 64, [128, 128, 128, 255]);
        let score = skin_ratio(&buffer, &SkinThresholds::default());
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_skin_filled_buffer_saturates() {
        let buffer = PixelBuffer::filled(64, 64, SKIN_TONE);
        let score = skin_ratio(&buffer, &SkinThresholds::default());
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blue_is_not_skin() {
        let buffer = PixelBuffer::filled(32, 32, [30, 60, 200, 255]);
        let score = skin_ratio(&buffer, &SkinThresholds::default());
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_buffer_is_total() {
        let buffer = PixelBuffer::filled(1, 1, SKIN_TONE);
        let score = skin_ratio(&buffer, &SkinThresholds::default());
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_scale_caps_at_100() {
        let buffer = PixelBuffer::filled(16, 16, SKIN_TONE);
        let config = SkinThresholds { scale: 10_000.0 };
        assert!((skin_ratio(&buffer, &config) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rgb_heuristic() {
        assert!(is_skin_rgb([210.0, 150.0, 120.0]));
        // No channel spread
        assert!(!is_skin_rgb([128.0, 128.0, 128.0]));
        // Red not dominant
        assert!(!is_skin_rgb([100.0, 180.0, 90.0]));
    }

    #[test]
    fn test_ycbcr_heuristic() {
        assert!(is_skin_ycbcr([210.0, 150.0, 120.0]));
        assert!(!is_skin_ycbcr([0.0, 0.0, 255.0]));
        // Neutral gray sits at Cb = Cr = 128, just outside the Cb band
        assert!(!is_skin_ycbcr([128.0, 128.0, 128.0]));
    }

    #[test]
    fn test_skin_only_outside_region_ignored() {
        // Paint the border skin-toned, keep the center gray: the circular
        // region only sees gray.
        let size = 64u32;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let border = x < 4 || y < 4 || x >= size - 4 || y >= size - 4;
                let px = if border { SKIN_TONE } else { [128, 128, 128, 255] };
                data.extend_from_slice(&px);
            }
        }
        #[allow(clippy::unwrap_used)]
        let buffer = PixelBuffer::new(size, size, data).unwrap();
        let score = skin_ratio(&buffer, &SkinThresholds::default());
        assert!(score.abs() < f64::EPSILON);
    }
}
