//! Regional color consistency.
//!
//! Composited media often fails to match color statistics across the frame.
//! The buffer is split into four equal quadrants; the average absolute
//! difference between quadrant mean colors, over all six quadrant pairs,
//! is mapped to a consistency score where 100 means perfectly uniform.

use super::config::ColorThresholds;
use crate::pixel::PixelBuffer;

/// Cross-quadrant color consistency in [0, 100].
#[must_use]
pub fn color_consistency(buffer: &PixelBuffer, config: &ColorThresholds) -> f64 {
    let width = buffer.width();
    let height = buffer.height();
    if width < 2 || height < 2 {
        // No cross-region variation is measurable.
        return 100.0;
    }

    let half_w = width / 2;
    let half_h = height / 2;
    let quadrants = [
        quadrant_mean(buffer, 0, 0, half_w, half_h),
        quadrant_mean(buffer, half_w, 0, width - half_w, half_h),
        quadrant_mean(buffer, 0, half_h, half_w, height - half_h),
        quadrant_mean(buffer, half_w, half_h, width - half_w, height - half_h),
    ];

    let mut total_diff = 0.0;
    let mut pairs = 0u32;
    for i in 0..quadrants.len() {
        for j in i + 1..quadrants.len() {
            let a = quadrants[i];
            let b = quadrants[j];
            total_diff +=
                ((a[0] - b[0]).abs() + (a[1] - b[1]).abs() + (a[2] - b[2]).abs()) / 3.0;
            pairs += 1;
        }
    }

    let avg_diff = total_diff / f64::from(pairs);
    (100.0 - avg_diff / config.scale).max(0.0)
}

fn quadrant_mean(buffer: &PixelBuffer, x0: u32, y0: u32, w: u32, h: u32) -> [f64; 3] {
    let mut sum = [0.0f64; 3];
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let rgb = buffer.rgb_f64(x, y);
            for c in 0..3 {
                sum[c] += rgb[c];
            }
        }
    }
    let count = f64::from(w) * f64::from(h);
    [sum[0] / count, sum[1] / count, sum[2] / count]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_color_is_perfectly_consistent() {
        let buffer = PixelBuffer::filled(64, 64, [90, 140, 200, 255]);
        let score = color_consistency(&buffer, &ColorThresholds::default());
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_buffer_is_consistent() {
        let buffer = PixelBuffer::filled(1, 1, [255, 0, 0, 255]);
        let score = color_consistency(&buffer, &ColorThresholds::default());
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_split_tone_lowers_score() {
        // Left half red, right half blue
        let size = 32u32;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for _y in 0..size {
            for x in 0..size {
                let px = if x < size / 2 {
                    [255u8, 0, 0, 255]
                } else {
                    [0u8, 0, 255, 255]
                };
                data.extend_from_slice(&px);
            }
        }
        let buffer = PixelBuffer::new(size, size, data).unwrap();
        let score = color_consistency(&buffer, &ColorThresholds::default());
        assert!(score < 100.0);
        assert!(score >= 0.0);
    }

    #[test]
    fn test_split_tone_exact_value() {
        // Quadrant means: two pure red, two pure blue. Four of six pairs
        // differ by (255 + 0 + 255) / 3 = 170, two pairs are identical.
        let size = 32u32;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for _y in 0..size {
            for x in 0..size {
                let px = if x < size / 2 {
                    [255u8, 0, 0, 255]
                } else {
                    [0u8, 0, 255, 255]
                };
                data.extend_from_slice(&px);
            }
        }
        let buffer = PixelBuffer::new(size, size, data).unwrap();
        let config = ColorThresholds::default();
        let avg_diff = 4.0 * 170.0 / 6.0;
        let expected = (100.0 - avg_diff / config.scale).max(0.0);
        let score = color_consistency(&buffer, &config);
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_floor_at_zero() {
        let size = 16u32;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for _y in 0..size {
            for x in 0..size {
                let px = if x < size / 2 {
                    [255u8, 255, 255, 255]
                } else {
                    [0u8, 0, 0, 255]
                };
                data.extend_from_slice(&px);
            }
        }
        let buffer = PixelBuffer::new(size, size, data).unwrap();
        let config = ColorThresholds { scale: 0.5 };
        let score = color_consistency(&buffer, &config);
        assert!(score.abs() < f64::EPSILON);
    }
}
