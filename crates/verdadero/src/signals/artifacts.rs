//! Local-variance artifact detection.
//!
//! Generative pipelines and splicing leave unnaturally noisy or unnaturally
//! flat micro-neighborhoods. Each interior pixel is flagged when its 3x3
//! neighborhood variance (summed over R, G, B) exceeds the configured
//! threshold, or when the pixel itself deviates hard from the neighborhood
//! mean. The flagged fraction is rescaled into [0, 100].

use super::config::ArtifactThresholds;
use crate::pixel::PixelBuffer;

/// Flagged-pixel artifact density over the interior of the buffer.
#[must_use]
pub fn artifact_score(buffer: &PixelBuffer, config: &ArtifactThresholds) -> f64 {
    let width = buffer.width();
    let height = buffer.height();
    if width < 3 || height < 3 {
        return 0.0;
    }

    let interior = u64::from(width - 2) * u64::from(height - 2);
    let mut flagged = 0u64;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sum = [0.0f64; 3];
            let mut sum_sq = [0.0f64; 3];
            for dy in 0..3u32 {
                for dx in 0..3u32 {
                    let rgb = buffer.rgb_f64(x + dx - 1, y + dy - 1);
                    for c in 0..3 {
                        sum[c] += rgb[c];
                        sum_sq[c] += rgb[c] * rgb[c];
                    }
                }
            }

            let mut variance_sum = 0.0;
            let mut mean = [0.0f64; 3];
            for c in 0..3 {
                mean[c] = sum[c] / 9.0;
                variance_sum += sum_sq[c] / 9.0 - mean[c] * mean[c];
            }

            let center = buffer.rgb_f64(x, y);
            let deviates = (0..3)
                .any(|c| (center[c] - mean[c]).abs() > config.deviation_threshold);

            if variance_sum > config.variance_threshold || deviates {
                flagged += 1;
            }
        }
    }

    let ratio = flagged as f64 / interior as f64;
    (ratio * config.scale).min(100.0)
}
