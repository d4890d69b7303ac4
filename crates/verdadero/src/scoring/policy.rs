//! Scoring policy: the weighted rule table and all tunable constants.
//!
//! The engine ships one rule engine with swappable named tunings. The
//! `balanced` tuning is the default; `aggressive` flags more and
//! `conservative` flags less. Tests pin exact values through these names
//! instead of scattering magic numbers.

use serde::{Deserialize, Serialize};

use super::threat::ThreatLadder;
use crate::signals::SignalSet;

/// Which extractor signal a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Skin-toned center-region fraction
    SkinRatio,
    /// Local-variance artifact density
    Artifact,
    /// Edge-direction consistency
    EdgeConsistency,
    /// 8x8 boundary discontinuity density
    Blockiness,
    /// Cross-quadrant color uniformity
    ColorConsistency,
    /// Histogram variance anomaly
    Frequency,
    /// Global-contrast quality
    Quality,
}

impl SignalKind {
    /// Read this signal out of a [`SignalSet`].
    #[must_use]
    pub fn value(self, signals: &SignalSet) -> f64 {
        match self {
            Self::SkinRatio => signals.skin_ratio,
            Self::Artifact => signals.artifact,
            Self::EdgeConsistency => signals.edge_consistency,
            Self::Blockiness => signals.blockiness,
            Self::ColorConsistency => signals.color_consistency,
            Self::Frequency => signals.frequency,
            Self::Quality => signals.quality,
        }
    }
}

/// Whether a rule fires above or below its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleDirection {
    /// Fires when the signal exceeds the threshold
    Above,
    /// Fires when the signal falls below the threshold
    Below,
}

/// One tiered threshold rule. Tiers on the same signal are cumulative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRule {
    /// Signal the rule reads
    pub signal: SignalKind,
    /// Firing direction
    pub direction: RuleDirection,
    /// Threshold the signal is compared against
    pub threshold: f64,
    /// Suspicion added when the rule fires
    pub bonus: f64,
}

impl SignalRule {
    /// Whether the rule fires for the given signals.
    #[must_use]
    pub fn applies(&self, signals: &SignalSet) -> bool {
        let value = self.signal.value(signals);
        match self.direction {
            RuleDirection::Above => value > self.threshold,
            RuleDirection::Below => value < self.threshold,
        }
    }
}

/// One temporal-consistency penalty tier (video only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalTier {
    /// Fires when temporal consistency falls below this value
    pub below: f64,
    /// Suspicion added when the tier fires
    pub bonus: f64,
}

/// Complete tunable policy for the suspicion scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Tuning name ("balanced", "aggressive", "conservative")
    pub name: String,
    /// Suspicion every asset starts from
    pub base_suspicion: f64,

    /// Filename substrings that add suspicion (case-insensitive, cumulative)
    pub suspect_keywords: Vec<String>,
    /// Suspicion added per matching suspect keyword
    pub suspect_keyword_bonus: f64,
    /// Filename substrings that subtract suspicion
    pub trusted_keywords: Vec<String>,
    /// Suspicion removed per matching trusted keyword
    pub trusted_keyword_bonus: f64,

    /// Tiered per-signal threshold rules
    pub signal_rules: Vec<SignalRule>,

    /// Byte sizes below this are suspicious
    pub min_normal_bytes: u64,
    /// Suspicion added for undersized files
    pub small_file_bonus: f64,
    /// Byte sizes above this are suspicious
    pub max_normal_bytes: u64,
    /// Suspicion added for oversized files
    pub large_file_bonus: f64,
    /// Pixel counts above this subtract suspicion (camera-grade resolution)
    pub high_res_pixels: u64,
    /// Suspicion removed for high-resolution assets
    pub high_res_bonus: f64,
    /// Lower bound of the normal aspect-ratio band
    pub min_aspect: f64,
    /// Upper bound of the normal aspect-ratio band
    pub max_aspect: f64,
    /// Suspicion added for aspect ratios outside the band
    pub odd_aspect_bonus: f64,

    /// Temporal-consistency penalty tiers (video only, cumulative)
    pub temporal_tiers: Vec<TemporalTier>,
    /// Clips shorter than this many seconds are suspicious
    pub short_clip_secs: f64,
    /// Suspicion added for short clips
    pub short_clip_bonus: f64,
    /// Clips longer than this many seconds subtract suspicion
    pub long_clip_secs: f64,
    /// Suspicion removed for long clips
    pub long_clip_bonus: f64,

    /// Fixed amplitude for the optional score perturbation
    pub jitter_amplitude: f64,
    /// Confidence above which the asset is reported as a deepfake
    pub decision_threshold: f64,
    /// Threat classification cutoffs
    pub ladder: ThreatLadder,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::balanced()
    }
}

impl ScoringPolicy {
    /// The default tuning.
    #[must_use]
    pub fn balanced() -> Self {
        Self {
            name: "balanced".to_string(),
            base_suspicion: 10.0,
            suspect_keywords: keywords(&["fake", "deepfake", "generated", "synthetic", "ai", "swap"]),
            suspect_keyword_bonus: 25.0,
            trusted_keywords: keywords(&["real", "authentic", "original", "genuine"]),
            trusted_keyword_bonus: 15.0,
            signal_rules: vec![
                rule(SignalKind::Artifact, RuleDirection::Above, 70.0, 10.0),
                rule(SignalKind::Artifact, RuleDirection::Above, 85.0, 10.0),
                rule(SignalKind::EdgeConsistency, RuleDirection::Below, 40.0, 8.0),
                rule(SignalKind::Blockiness, RuleDirection::Above, 60.0, 6.0),
                rule(SignalKind::ColorConsistency, RuleDirection::Below, 55.0, 6.0),
                rule(SignalKind::Frequency, RuleDirection::Above, 85.0, 5.0),
                rule(SignalKind::SkinRatio, RuleDirection::Above, 60.0, 4.0),
                rule(SignalKind::Quality, RuleDirection::Below, 10.0, 3.0),
            ],
            min_normal_bytes: 20 * 1024,
            small_file_bonus: 8.0,
            max_normal_bytes: 15 * 1024 * 1024,
            large_file_bonus: 5.0,
            high_res_pixels: 3840 * 2160,
            high_res_bonus: 6.0,
            min_aspect: 0.4,
            max_aspect: 2.5,
            odd_aspect_bonus: 6.0,
            temporal_tiers: vec![
                TemporalTier {
                    below: 70.0,
                    bonus: 10.0,
                },
                TemporalTier {
                    below: 50.0,
                    bonus: 10.0,
                },
            ],
            short_clip_secs: 2.0,
            short_clip_bonus: 8.0,
            long_clip_secs: 120.0,
            long_clip_bonus: 5.0,
            jitter_amplitude: 3.0,
            decision_threshold: 60.0,
            ladder: ThreatLadder::default(),
        }
    }

    /// Flags more: lower thresholds, larger bonuses.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            name: "aggressive".to_string(),
            base_suspicion: 18.0,
            suspect_keyword_bonus: 30.0,
            trusted_keyword_bonus: 10.0,
            signal_rules: vec![
                rule(SignalKind::Artifact, RuleDirection::Above, 60.0, 12.0),
                rule(SignalKind::Artifact, RuleDirection::Above, 80.0, 12.0),
                rule(SignalKind::EdgeConsistency, RuleDirection::Below, 50.0, 10.0),
                rule(SignalKind::Blockiness, RuleDirection::Above, 50.0, 8.0),
                rule(SignalKind::ColorConsistency, RuleDirection::Below, 65.0, 8.0),
                rule(SignalKind::Frequency, RuleDirection::Above, 75.0, 7.0),
                rule(SignalKind::SkinRatio, RuleDirection::Above, 50.0, 6.0),
                rule(SignalKind::Quality, RuleDirection::Below, 15.0, 5.0),
            ],
            temporal_tiers: vec![
                TemporalTier {
                    below: 80.0,
                    bonus: 12.0,
                },
                TemporalTier {
                    below: 60.0,
                    bonus: 12.0,
                },
            ],
            short_clip_secs: 3.0,
            short_clip_bonus: 10.0,
            decision_threshold: 55.0,
            ladder: ThreatLadder {
                critical_confidence: 80.0,
                critical_artifact: 85.0,
                high_confidence: 60.0,
                high_artifact: 75.0,
                medium_confidence: 40.0,
            },
            ..Self::balanced()
        }
    }

    /// Flags less: higher thresholds, smaller bonuses.
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            name: "conservative".to_string(),
            base_suspicion: 5.0,
            suspect_keyword_bonus: 18.0,
            trusted_keyword_bonus: 20.0,
            signal_rules: vec![
                rule(SignalKind::Artifact, RuleDirection::Above, 80.0, 8.0),
                rule(SignalKind::Artifact, RuleDirection::Above, 92.0, 8.0),
                rule(SignalKind::EdgeConsistency, RuleDirection::Below, 30.0, 6.0),
                rule(SignalKind::Blockiness, RuleDirection::Above, 75.0, 4.0),
                rule(SignalKind::ColorConsistency, RuleDirection::Below, 40.0, 4.0),
                rule(SignalKind::Frequency, RuleDirection::Above, 92.0, 3.0),
                rule(SignalKind::SkinRatio, RuleDirection::Above, 75.0, 3.0),
            ],
            temporal_tiers: vec![TemporalTier {
                below: 55.0,
                bonus: 8.0,
            }],
            short_clip_secs: 1.0,
            short_clip_bonus: 5.0,
            jitter_amplitude: 2.0,
            decision_threshold: 75.0,
            ladder: ThreatLadder {
                critical_confidence: 90.0,
                critical_artifact: 95.0,
                high_confidence: 78.0,
                high_artifact: 88.0,
                medium_confidence: 55.0,
            },
            ..Self::balanced()
        }
    }

    /// Look up a tuning by name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "balanced" => Some(Self::balanced()),
            "aggressive" => Some(Self::aggressive()),
            "conservative" => Some(Self::conservative()),
            _ => None,
        }
    }

    /// All tuning names, default first.
    #[must_use]
    pub fn names() -> &'static [&'static str] {
        &["balanced", "aggressive", "conservative"]
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

const fn rule(
    signal: SignalKind,
    direction: RuleDirection,
    threshold: f64,
    bonus: f64,
) -> SignalRule {
    SignalRule {
        signal,
        direction,
        threshold,
        bonus,
    }
}
