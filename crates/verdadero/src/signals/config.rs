//! Threshold configuration for the signal extractors.
//!
//! Every cutoff and scale constant used by the analyzers is a named field
//! here so test suites can pin exact values. Defaults are the balanced
//! tuning; JSON deserialization fills missing fields from those defaults.

use serde::{Deserialize, Serialize};

/// Root configuration for the signal extractors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Skin-ratio extractor settings
    pub skin: SkinThresholds,
    /// Artifact-variance extractor settings
    pub artifact: ArtifactThresholds,
    /// Edge-consistency extractor settings
    pub edge: EdgeThresholds,
    /// Compression-blockiness extractor settings
    pub blockiness: BlockinessThresholds,
    /// Quadrant color-consistency extractor settings
    pub color: ColorThresholds,
    /// Frequency-anomaly extractor settings
    pub frequency: FrequencyThresholds,
    /// Image-quality extractor settings
    pub quality: QualityThresholds,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            skin: SkinThresholds::default(),
            artifact: ArtifactThresholds::default(),
            edge: EdgeThresholds::default(),
            blockiness: BlockinessThresholds::default(),
            color: ColorThresholds::default(),
            frequency: FrequencyThresholds::default(),
            quality: QualityThresholds::default(),
        }
    }
}

/// Skin-ratio extractor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinThresholds {
    /// Multiplier applied to the skin-pixel fraction before capping at 100
    pub scale: f64,
}

impl Default for SkinThresholds {
    fn default() -> Self {
        Self { scale: 180.0 }
    }
}

/// Artifact-variance extractor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactThresholds {
    /// Summed per-channel local variance above which a pixel is flagged
    pub variance_threshold: f64,
    /// Absolute channel deviation from the neighborhood mean that flags a pixel
    pub deviation_threshold: f64,
    /// Multiplier applied to the flagged-pixel fraction before capping at 100
    pub scale: f64,
}

impl Default for ArtifactThresholds {
    fn default() -> Self {
        Self {
            variance_threshold: 3000.0,
            deviation_threshold: 100.0,
            scale: 500.0,
        }
    }
}

/// Edge-consistency extractor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeThresholds {
    /// Sobel gradient magnitude above which a pixel counts as an edge
    pub magnitude_threshold: f64,
    /// Maximum angular distance (degrees, mod 180) for a consistent neighbor
    pub angle_tolerance_deg: f64,
    /// Score reported when the buffer contains no edges at all
    pub neutral_score: f64,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            magnitude_threshold: 40.0,
            angle_tolerance_deg: 45.0,
            neutral_score: 75.0,
        }
    }
}

/// Compression-blockiness extractor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockinessThresholds {
    /// Mean-luma jump across an 8x8 block boundary that counts as blocky
    pub edge_threshold: f64,
}

impl Default for BlockinessThresholds {
    fn default() -> Self {
        Self {
            edge_threshold: 32.0,
        }
    }
}

/// Quadrant color-consistency extractor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorThresholds {
    /// Divisor applied to the average quadrant-pair difference
    pub scale: f64,
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self { scale: 12.0 }
    }
}

/// Frequency-anomaly extractor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyThresholds {
    /// Maximum dimension the buffer is downscaled to before histogramming
    pub max_dim: u32,
    /// Divisor rescaling the histogram variance into [0, 100]
    pub divisor: f64,
}

impl Default for FrequencyThresholds {
    fn default() -> Self {
        Self {
            max_dim: 256,
            divisor: 1500.0,
        }
    }
}

/// Image-quality extractor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Divisor rescaling the global luma variance into [0, 100]
    pub divisor: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self { divisor: 10.0 }
    }
}

impl SignalConfig {
    /// Load configuration from a JSON string.
    ///
    /// # Errors
    /// Returns error if JSON parsing fails
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let positive = [
            ("skin.scale", self.skin.scale),
            ("artifact.variance_threshold", self.artifact.variance_threshold),
            ("artifact.deviation_threshold", self.artifact.deviation_threshold),
            ("artifact.scale", self.artifact.scale),
            ("edge.magnitude_threshold", self.edge.magnitude_threshold),
            ("blockiness.edge_threshold", self.blockiness.edge_threshold),
            ("color.scale", self.color.scale),
            ("frequency.divisor", self.frequency.divisor),
            ("quality.divisor", self.quality.divisor),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "Must be positive".to_string(),
                });
            }
        }

        if !(0.0..=90.0).contains(&self.edge.angle_tolerance_deg) {
            errors.push(ConfigValidationError {
                field: "edge.angle_tolerance_deg".to_string(),
                message: "Must be between 0 and 90".to_string(),
            });
        }

        if !(0.0..=100.0).contains(&self.edge.neutral_score) {
            errors.push(ConfigValidationError {
                field: "edge.neutral_score".to_string(),
                message: "Must be between 0 and 100".to_string(),
            });
        }

        if self.frequency.max_dim == 0 {
            errors.push(ConfigValidationError {
                field: "frequency.max_dim".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        errors
    }

    /// Check if configuration is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Configuration validation error.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
