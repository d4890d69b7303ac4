//! Frame Aggregator: temporal consistency across sampled video frames.
//!
//! Authentic footage changes smoothly between nearby frames; face-swapped
//! video flickers in the signals the extractors measure. Consistency is the
//! average, over consecutive frame pairs, of `100 - weightedDelta`, floored
//! at zero, where the delta weighs the skin, artifact, and quality signals.

use serde::{Deserialize, Serialize};

use crate::signals::SignalSet;

/// Weights and fallbacks for the temporal comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Weight on the skin-ratio delta
    pub skin_weight: f64,
    /// Weight on the artifact delta
    pub artifact_weight: f64,
    /// Weight on the quality delta
    pub quality_weight: f64,
    /// Consistency reported when fewer than two frames exist
    pub neutral_score: f64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            skin_weight: 0.4,
            artifact_weight: 0.4,
            quality_weight: 0.2,
            neutral_score: 100.0,
        }
    }
}

impl TemporalConfig {
    /// True when the delta weights sum to 1 (within tolerance).
    #[must_use]
    pub fn weights_normalized(&self) -> bool {
        let sum = self.skin_weight + self.artifact_weight + self.quality_weight;
        (sum - 1.0).abs() < 1e-9
    }
}

/// Average consecutive-pair consistency over an ordered frame sequence.
///
/// Sequences with fewer than two frames yield `config.neutral_score`,
/// since there is nothing to compare.
#[must_use]
pub fn temporal_consistency(frames: &[SignalSet], config: &TemporalConfig) -> f64 {
    if frames.len() < 2 {
        return config.neutral_score;
    }

    let mut total = 0.0;
    for pair in frames.windows(2) {
        let delta = config.skin_weight * (pair[1].skin_ratio - pair[0].skin_ratio).abs()
            + config.artifact_weight * (pair[1].artifact - pair[0].artifact).abs()
            + config.quality_weight * (pair[1].quality - pair[0].quality).abs();
        total += (100.0 - delta).max(0.0);
    }

    total / (frames.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(skin: f64, artifact: f64, quality: f64) -> SignalSet {
        SignalSet {
            skin_ratio: skin,
            artifact,
            quality,
            ..SignalSet::default()
        }
    }

    #[test]
    fn test_single_frame_neutral() {
        let config = TemporalConfig::default();
        let frames = vec![frame(50.0, 20.0, 30.0)];
        let score = temporal_consistency(&frames, &config);
        assert!((score - config.neutral_score).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_sequence_neutral() {
        let config = TemporalConfig::default();
        let score = temporal_consistency(&[], &config);
        assert!((score - config.neutral_score).abs() < f64::EPSILON);
    }

    #[test]
    fn test_identical_frames_perfectly_consistent() {
        let config = TemporalConfig::default();
        let frames = vec![frame(40.0, 10.0, 60.0); 5];
        let score = temporal_consistency(&frames, &config);
        assert!((score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_known_delta() {
        let config = TemporalConfig::default();
        let frames = vec![frame(0.0, 0.0, 0.0), frame(10.0, 20.0, 30.0)];
        // delta = 0.4*10 + 0.4*20 + 0.2*30 = 18
        let score = temporal_consistency(&frames, &config);
        assert!((score - 82.0).abs() < 1e-9);
    }

    #[test]
    fn test_floor_at_zero() {
        let config = TemporalConfig::default();
        let frames = vec![frame(0.0, 0.0, 0.0), frame(100.0, 100.0, 100.0)];
        // delta = 100, consistency exactly 0
        let score = temporal_consistency(&frames, &config);
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_weights_normalized() {
        assert!(TemporalConfig::default().weights_normalized());
        let skewed = TemporalConfig {
            skin_weight: 0.9,
            ..TemporalConfig::default()
        };
        assert!(!skewed.weights_normalized());
    }

    #[test]
    fn test_averages_over_pairs() {
        let config = TemporalConfig::default();
        // First pair delta 18, second pair delta 0
        let frames = vec![
            frame(0.0, 0.0, 0.0),
            frame(10.0, 20.0, 30.0),
            frame(10.0, 20.0, 30.0),
        ];
        let score = temporal_consistency(&frames, &config);
        assert!((score - (82.0 + 100.0) / 2.0).abs() < 1e-9);
    }
}
