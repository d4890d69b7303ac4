//! Sobel edge-direction consistency.
//!
//! Natural images have locally coherent edge orientations; blended or
//! regenerated regions tend to break that coherence. The 3x3 Sobel operator
//! runs on the BT.601 luma projection; a pixel is an edge when its gradient
//! magnitude clears the threshold, and an edge is consistent when more than
//! half of its neighboring edges point the same way (within the angular
//! tolerance, mod 180 degrees).

use super::config::EdgeThresholds;
use crate::pixel::PixelBuffer;

/// Sobel horizontal kernel.
const SOBEL_GX: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
/// Sobel vertical kernel.
const SOBEL_GY: [[f64; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Percentage of edges whose neighborhood agrees on direction.
///
/// Falls back to `config.neutral_score` when no edges are found, including
/// degenerate buffers with no interior.
#[must_use]
pub fn edge_consistency(buffer: &PixelBuffer, config: &EdgeThresholds) -> f64 {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    if width < 3 || height < 3 {
        return config.neutral_score;
    }

    let luma = buffer.luma_plane();
    // Edge angle in [0, 180) for edge pixels, NaN elsewhere.
    let mut angles = vec![f64::NAN; width * height];
    let mut total_edges = 0u64;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut gx = 0.0;
            let mut gy = 0.0;
            for ky in 0..3 {
                for kx in 0..3 {
                    let sample = luma[(y + ky - 1) * width + (x + kx - 1)];
                    gx += SOBEL_GX[ky][kx] * sample;
                    gy += SOBEL_GY[ky][kx] * sample;
                }
            }
            let magnitude = gx.hypot(gy);
            if magnitude > config.magnitude_threshold {
                angles[y * width + x] = gy.atan2(gx).to_degrees().rem_euclid(180.0);
                total_edges += 1;
            }
        }
    }

    if total_edges == 0 {
        return config.neutral_score;
    }

    let mut consistent = 0u64;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let angle = angles[y * width + x];
            if angle.is_nan() {
                continue;
            }
            let mut neighbors = 0u32;
            let mut agreeing = 0u32;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = (x as i64 + dx) as usize;
                    let ny = (y as i64 + dy) as usize;
                    let other = angles[ny * width + nx];
                    if other.is_nan() {
                        continue;
                    }
                    neighbors += 1;
                    if angular_distance(angle, other) <= config.angle_tolerance_deg {
                        agreeing += 1;
                    }
                }
            }
            // Isolated edges have nothing to disagree with.
            if neighbors == 0 || agreeing * 2 > neighbors {
                consistent += 1;
            }
        }
    }

    consistent as f64 / total_edges as f64 * 100.0
}

/// Distance between two undirected edge angles, in [0, 90].
fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 180.0;
    diff.min(180.0 - diff)
}
