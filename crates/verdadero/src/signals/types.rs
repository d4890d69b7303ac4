//! Signal types shared by the extractors.

use serde::{Deserialize, Serialize};

/// One scalar signal per extractor, produced for a single frame or image.
///
/// Every field is bounded to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalSet {
    /// Skin-toned fraction of the circular center region
    pub skin_ratio: f64,
    /// Local-variance artifact density
    pub artifact: f64,
    /// Fraction of Sobel edges with directionally consistent neighbors
    pub edge_consistency: f64,
    /// 8x8 block boundary discontinuity density
    pub blockiness: f64,
    /// Cross-quadrant color uniformity (100 = perfectly consistent)
    pub color_consistency: f64,
    /// Gray-level histogram variance anomaly
    pub frequency: f64,
    /// Global-contrast quality estimate
    pub quality: f64,
}

impl SignalSet {
    /// Component-wise mean over a frame sequence.
    ///
    /// An empty sequence yields the all-zero set.
    #[must_use]
    pub fn average(sets: &[SignalSet]) -> SignalSet {
        if sets.is_empty() {
            return SignalSet::default();
        }
        let n = sets.len() as f64;
        let mut mean = SignalSet::default();
        for set in sets {
            mean.skin_ratio += set.skin_ratio;
            mean.artifact += set.artifact;
            mean.edge_consistency += set.edge_consistency;
            mean.blockiness += set.blockiness;
            mean.color_consistency += set.color_consistency;
            mean.frequency += set.frequency;
            mean.quality += set.quality;
        }
        mean.skin_ratio /= n;
        mean.artifact /= n;
        mean.edge_consistency /= n;
        mean.blockiness /= n;
        mean.color_consistency /= n;
        mean.frequency /= n;
        mean.quality /= n;
        mean
    }

    /// True when every signal lies inside the [0, 100] contract.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        [
            self.skin_ratio,
            self.artifact,
            self.edge_consistency,
            self.blockiness,
            self.color_consistency,
            self.frequency,
            self.quality,
        ]
        .iter()
        .all(|s| (0.0..=100.0).contains(s))
    }
}
