//! Global-contrast quality estimate.
//!
//! Reports the variance of the grayscale projection across the whole
//! buffer, rescaled so that flat, low-information frames score near zero.

use super::config::QualityThresholds;
use crate::pixel::PixelBuffer;

/// Global luma-variance quality score in [0, 100].
#[must_use]
pub fn quality_score(buffer: &PixelBuffer, config: &QualityThresholds) -> f64 {
    let pixels = buffer.pixel_count();
    if pixels == 0 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let luma = buffer.luma(x, y);
            sum += luma;
            sum_sq += luma * luma;
        }
    }

    let n = pixels as f64;
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);
    (variance / config.divisor).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_buffer_zero_quality() {
        let buffer = PixelBuffer::filled(64, 64, [128, 128, 128, 255]);
        let score = quality_score(&buffer, &QualityThresholds::default());
        assert!(score.abs() < 1e-6);
    }

    #[test]
    fn test_empty_buffer_zero_quality() {
        let buffer = PixelBuffer::filled(0, 0, [0, 0, 0, 0]);
        let score = quality_score(&buffer, &QualityThresholds::default());
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_high_contrast_saturates() {
        // Half black, half white: variance 128^2 * ... well above 1000.
        let size = 32u32;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for _x in 0..size {
                let v = if y < size / 2 { 0u8 } else { 255u8 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        #[allow(clippy::unwrap_used)]
        let buffer = PixelBuffer::new(size, size, data).unwrap();
        let score = quality_score(&buffer, &QualityThresholds::default());
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mild_contrast_midrange() {
        // Two tones 20 luma apart: variance 100, score 10 with the
        // default divisor.
        let size = 16u32;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for _x in 0..size {
                let v = if y < size / 2 { 118u8 } else { 138u8 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        #[allow(clippy::unwrap_used)]
        let buffer = PixelBuffer::new(size, size, data).unwrap();
        let score = quality_score(&buffer, &QualityThresholds::default());
        assert!((score - 10.0).abs() < 1e-6);
    }
}
