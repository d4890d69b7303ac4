//! Signal Extractors: independent pixel-buffer heuristics.
//!
//! Each extractor consumes one [`PixelBuffer`] and produces one bounded
//! scalar signal. Extractors are stateless, mutually independent, and never
//! fail: degenerate inputs resolve to neutral fallbacks.
//!
//! # Usage
//!
//! ```text
//! PixelBuffer ──→ extract_signals ──→ SignalSet
//!                      │
//!        SignalConfig (named thresholds)
//! ```

pub mod artifacts;
pub mod blockiness;
pub mod color;
pub mod config;
pub mod edges;
pub mod frequency;
pub mod quality;
pub mod skin;
pub mod types;

pub use artifacts::artifact_score;
pub use blockiness::blockiness_score;
pub use color::color_consistency;
pub use config::{
    ArtifactThresholds, BlockinessThresholds, ColorThresholds, ConfigValidationError,
    EdgeThresholds, FrequencyThresholds, QualityThresholds, SignalConfig, SkinThresholds,
};
pub use edges::edge_consistency;
pub use frequency::frequency_score;
pub use quality::quality_score;
pub use skin::skin_ratio;
pub use types::SignalSet;

use crate::pixel::PixelBuffer;

/// Run every extractor over one buffer.
///
/// Extractor order never affects output; each performs an independent
/// read-only scan.
#[must_use]
pub fn extract_signals(buffer: &PixelBuffer, config: &SignalConfig) -> SignalSet {
    SignalSet {
        skin_ratio: skin_ratio(buffer, &config.skin),
        artifact: artifact_score(buffer, &config.artifact),
        edge_consistency: edge_consistency(buffer, &config.edge),
        blockiness: blockiness_score(buffer, &config.blockiness),
        color_consistency: color_consistency(buffer, &config.color),
        frequency: frequency_score(buffer, &config.frequency),
        quality: quality_score(buffer, &config.quality),
    }
}
