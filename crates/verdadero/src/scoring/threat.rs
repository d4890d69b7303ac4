//! Ordered threat classification.

use serde::{Deserialize, Serialize};

/// Ordered threat classification derived from confidence and the artifact
/// signal. `LOW < MEDIUM < HIGH < CRITICAL`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    /// Consistent with authentic media
    #[default]
    Low,
    /// Some suspicious indicators
    Medium,
    /// Likely manipulated
    High,
    /// Strong manipulation indicators
    Critical,
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Named cutoffs for the two ORed classification ladders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatLadder {
    /// Confidence at or above which the level is CRITICAL
    pub critical_confidence: f64,
    /// Artifact signal at or above which the level is CRITICAL
    pub critical_artifact: f64,
    /// Confidence at or above which the level is at least HIGH
    pub high_confidence: f64,
    /// Artifact signal at or above which the level is at least HIGH
    pub high_artifact: f64,
    /// Confidence at or above which the level is at least MEDIUM
    pub medium_confidence: f64,
}

impl Default for ThreatLadder {
    fn default() -> Self {
        Self {
            critical_confidence: 85.0,
            critical_artifact: 90.0,
            high_confidence: 70.0,
            high_artifact: 80.0,
            medium_confidence: 45.0,
        }
    }
}

impl ThreatLadder {
    /// Classify, most severe rung first. Confidence and artifact ladders
    /// are independent and ORed, so the result is monotonic in confidence
    /// for any fixed artifact value.
    #[must_use]
    pub fn classify(&self, confidence: f64, artifact: f64) -> ThreatLevel {
        if confidence >= self.critical_confidence || artifact >= self.critical_artifact {
            ThreatLevel::Critical
        } else if confidence >= self.high_confidence || artifact >= self.high_artifact {
            ThreatLevel::High
        } else if confidence >= self.medium_confidence {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }
}
