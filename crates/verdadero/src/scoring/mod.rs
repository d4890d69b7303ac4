//! Suspicion Scorer: weighted rule table over signals and metadata.
//!
//! A pure function: signals plus coarse file metadata go in, a clamped
//! confidence, threat classification, and report analysis come out. All
//! tunables live in [`ScoringPolicy`]; the optional perturbation source is
//! injected by the caller.
//!
//! # Usage
//!
//! ```text
//! SignalSet[] ─┐
//! temporal ────┼──→ score ──→ ScoreOutcome { confidence, threat, analysis }
//! metadata ────┤
//! policy ──────┘
//! ```

pub mod policy;
pub mod threat;

pub use policy::{RuleDirection, ScoringPolicy, SignalKind, SignalRule, TemporalTier};
pub use threat::{ThreatLadder, ThreatLevel};

use crate::jitter::Jitter;
use crate::report::DetectionAnalysis;
use crate::signals::SignalSet;
use crate::source::{MediaKind, MediaMetadata};

/// Output of one scoring pass.
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    /// Aggregated suspicion, clamped to [0, 100]
    pub confidence: f64,
    /// Threat classification from the policy ladder
    pub threat_level: ThreatLevel,
    /// Whether confidence cleared the decision threshold
    pub is_deepfake: bool,
    /// Report-facing sub-scores
    pub analysis: DetectionAnalysis,
}

/// Score an analyzed asset.
///
/// `frames` holds one [`SignalSet`] per analyzed frame (exactly one for
/// images); `temporal` is the cross-frame consistency (neutral for
/// images). Never fails on valid signal sets.
#[must_use]
pub fn score(
    frames: &[SignalSet],
    temporal: f64,
    metadata: &MediaMetadata,
    policy: &ScoringPolicy,
    jitter: &mut Jitter,
) -> ScoreOutcome {
    let mean = SignalSet::average(frames);
    let mut suspicion = policy.base_suspicion;

    // Filename keyword rules: case-insensitive substring, all matches apply.
    let lowered = metadata.filename.to_lowercase();
    for keyword in &policy.suspect_keywords {
        if lowered.contains(keyword.as_str()) {
            suspicion += policy.suspect_keyword_bonus;
        }
    }
    for keyword in &policy.trusted_keywords {
        if lowered.contains(keyword.as_str()) {
            suspicion -= policy.trusted_keyword_bonus;
        }
    }

    // Tiered per-signal threshold rules, cumulative.
    for rule in &policy.signal_rules {
        if rule.applies(&mean) {
            suspicion += rule.bonus;
        }
    }

    // Coarse metadata rules.
    if metadata.byte_size < policy.min_normal_bytes {
        suspicion += policy.small_file_bonus;
    }
    if metadata.byte_size > policy.max_normal_bytes {
        suspicion += policy.large_file_bonus;
    }
    if metadata.pixel_count() > policy.high_res_pixels {
        suspicion -= policy.high_res_bonus;
    }
    let aspect = metadata.aspect_ratio();
    if aspect > 0.0 && !(policy.min_aspect..=policy.max_aspect).contains(&aspect) {
        suspicion += policy.odd_aspect_bonus;
    }

    // Video-only rules: temporal penalty tiers plus duration adjustment.
    if metadata.kind == MediaKind::Video {
        for tier in &policy.temporal_tiers {
            if temporal < tier.below {
                suspicion += tier.bonus;
            }
        }
        if let Some(duration) = metadata.duration_secs {
            if duration < policy.short_clip_secs {
                suspicion += policy.short_clip_bonus;
            } else if duration > policy.long_clip_secs {
                suspicion -= policy.long_clip_bonus;
            }
        }
    }

    suspicion += jitter.next_offset();

    let confidence = suspicion.clamp(0.0, 100.0);
    let threat_level = policy.ladder.classify(confidence, mean.artifact);

    ScoreOutcome {
        confidence,
        threat_level,
        is_deepfake: confidence > policy.decision_threshold,
        analysis: DetectionAnalysis {
            face_detection: mean.skin_ratio,
            temporal_consistency: temporal,
            artifact_detection: mean.artifact,
            image_quality: mean.quality,
            neural_network_confidence: confidence,
        },
    }
}
