//! Gray-level histogram frequency anomaly.
//!
//! Natural photographs spread luma across many histogram bins; synthetic
//! or heavily processed frames concentrate mass in few bins. The buffer is
//! downscaled to bound the work, a 256-bin luma histogram is built, and
//! its variance around the expected-uniform mean is rescaled into [0, 100].

use super::config::FrequencyThresholds;
use crate::pixel::PixelBuffer;

/// Number of gray-level histogram bins.
pub const HISTOGRAM_BINS: usize = 256;

/// Histogram-variance anomaly score in [0, 100].
#[must_use]
pub fn frequency_score(buffer: &PixelBuffer, config: &FrequencyThresholds) -> f64 {
    let scaled = buffer.downscaled(config.max_dim);
    let pixels = scaled.pixel_count();
    if pixels == 0 {
        return 0.0;
    }

    let mut histogram = [0u64; HISTOGRAM_BINS];
    for y in 0..scaled.height() {
        for x in 0..scaled.width() {
            let bin = (scaled.luma(x, y).round() as usize).min(HISTOGRAM_BINS - 1);
            histogram[bin] += 1;
        }
    }

    let mean = pixels as f64 / HISTOGRAM_BINS as f64;
    let variance = histogram
        .iter()
        .map(|&count| {
            let dev = count as f64 - mean;
            dev * dev
        })
        .sum::<f64>()
        / HISTOGRAM_BINS as f64;

    (variance / config.divisor).min(100.0)
}
