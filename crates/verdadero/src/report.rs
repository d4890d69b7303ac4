//! Detection records and their JSON export shape.
//!
//! [`DetectionResult`] is the one externally persisted shape: a flat
//! camelCase object with floating-point sub-scores, the threat level as a
//! fixed string token, and an ISO-8601 timestamp. Records are created once
//! per submitted asset and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::result::DetectResult;
use crate::scoring::ThreatLevel;

/// Report-facing sub-scores for one analyzed asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionAnalysis {
    /// Skin/face-region estimate
    pub face_detection: f64,
    /// Cross-frame stability (neutral for images)
    pub temporal_consistency: f64,
    /// Artifact-variance density
    pub artifact_detection: f64,
    /// Global-contrast quality
    pub image_quality: f64,
    /// Final aggregate confidence, mirrored for report consumers
    pub neural_network_confidence: f64,
}

/// Final record for one submitted asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Unique record id
    pub id: Uuid,
    /// Original filename
    pub filename: String,
    /// Whether confidence cleared the decision threshold
    pub is_deepfake: bool,
    /// Aggregated suspicion in [0, 100]
    pub confidence: f64,
    /// Ordered threat classification
    pub threat_level: ThreatLevel,
    /// Sub-score breakdown
    pub analysis: DetectionAnalysis,
    /// Wall-clock analysis time in milliseconds
    #[serde(rename = "processingTime")]
    pub processing_time_ms: f64,
    /// Record creation time (ISO-8601 in JSON)
    pub timestamp: DateTime<Utc>,
}

impl DetectionResult {
    /// Neutral record for an asset that failed to decode: zero confidence,
    /// LOW threat, so downstream displays stay consistent.
    #[must_use]
    pub fn neutral(filename: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            is_deepfake: false,
            confidence: 0.0,
            threat_level: ThreatLevel::Low,
            analysis: DetectionAnalysis {
                face_detection: 0.0,
                temporal_consistency: 0.0,
                artifact_detection: 0.0,
                image_quality: 0.0,
                neural_network_confidence: 0.0,
            },
            processing_time_ms: 0.0,
            timestamp: Utc::now(),
        }
    }
}

/// Serialize a result list to pretty-printed JSON.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn to_export_json(results: &[DetectionResult]) -> DetectResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Write a result list to a JSON file.
///
/// # Errors
///
/// Returns error on serialization or I/O failure.
pub fn export_results(results: &[DetectionResult], path: &Path) -> DetectResult<()> {
    std::fs::write(path, to_export_json(results)?)?;
    Ok(())
}

/// Read a result list back from a JSON file.
///
/// # Errors
///
/// Returns error on I/O or parse failure.
pub fn import_results(path: &Path) -> DetectResult<Vec<DetectionResult>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
