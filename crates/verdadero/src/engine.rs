//! Detection Engine: the per-asset analysis pipeline.
//!
//! One engine value owns the full configuration (signal thresholds,
//! temporal weights, scoring policy, perturbation source) and an explicit
//! readiness state. Every analyze call runs the same pipeline:
//! decode → extract → (aggregate, video only) → score → record.
//!
//! Assets never share state: each call owns its pixel buffers exclusively,
//! and batch processing isolates failures per asset.

use std::path::Path;
use std::time::Instant;

use crate::jitter::Jitter;
use crate::pixel::PixelBuffer;
use crate::report::DetectionResult;
use crate::result::{DetectError, DetectResult};
use crate::scoring::{score, ScoringPolicy};
use crate::signals::{extract_signals, SignalConfig, SignalSet};
use crate::source::{
    decode_image, sample_video_frames, MediaKind, MediaMetadata, DEFAULT_FRAME_COUNT,
};
use crate::temporal::{temporal_consistency, TemporalConfig};

/// Complete engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Extractor thresholds
    pub signals: SignalConfig,
    /// Temporal comparison weights
    pub temporal: TemporalConfig,
    /// Scoring policy tuning
    pub policy: ScoringPolicy,
    /// Score perturbation source
    pub jitter: Jitter,
    /// Frames sampled per video
    pub frame_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let policy = ScoringPolicy::balanced();
        Self {
            signals: SignalConfig::default(),
            temporal: TemporalConfig::default(),
            jitter: Jitter::new(policy.jitter_amplitude),
            policy,
            frame_count: DEFAULT_FRAME_COUNT,
        }
    }
}

impl EngineConfig {
    /// Replace the scoring policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the perturbation source.
    #[must_use]
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Replace the extractor thresholds.
    #[must_use]
    pub fn with_signals(mut self, signals: SignalConfig) -> Self {
        self.signals = signals;
        self
    }

    /// Set the per-video frame count.
    #[must_use]
    pub const fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }
}

/// Explicit engine readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed but not yet warmed up
    Cold,
    /// Configuration accepted; analyze calls permitted
    Ready,
}

/// The media authenticity analysis pipeline.
#[derive(Debug)]
pub struct DetectionEngine {
    config: EngineConfig,
    state: EngineState,
}

impl DetectionEngine {
    /// Construct a cold engine. Call [`warm_up`](Self::warm_up) before
    /// analyzing.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::Cold,
        }
    }

    /// Validate configuration and mark the engine ready.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidConfig`] when extractor thresholds
    /// fail validation or the temporal weights do not sum to 1.
    pub fn warm_up(&mut self) -> DetectResult<()> {
        let errors = self.config.signals.validate();
        if let Some(first) = errors.first() {
            return Err(DetectError::InvalidConfig {
                message: first.to_string(),
            });
        }
        if !self.config.temporal.weights_normalized() {
            return Err(DetectError::InvalidConfig {
                message: "temporal weights must sum to 1".to_string(),
            });
        }
        if self.config.frame_count == 0 {
            return Err(DetectError::InvalidConfig {
                message: "frame_count must be at least 1".to_string(),
            });
        }
        tracing::info!(policy = %self.config.policy.name, "engine ready");
        self.state = EngineState::Ready;
        Ok(())
    }

    /// Current readiness state.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Whether analyze calls are permitted.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Ready
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn ensure_ready(&self) -> DetectResult<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(DetectError::EngineNotReady)
        }
    }

    /// Analyze a still image from its encoded bytes.
    ///
    /// # Errors
    ///
    /// Fails when the engine is cold or the bytes cannot be decoded.
    pub fn analyze_image(
        &mut self,
        bytes: &[u8],
        filename: &str,
        byte_size: u64,
    ) -> DetectResult<DetectionResult> {
        self.ensure_ready()?;
        let started = Instant::now();
        let buffer = decode_image(bytes)?;
        let metadata = MediaMetadata {
            filename: filename.to_string(),
            byte_size,
            width: buffer.width(),
            height: buffer.height(),
            kind: MediaKind::Image,
            duration_secs: None,
        };
        self.finish(&[buffer], metadata, started)
    }

    /// Analyze a video file: probe, sample frames, aggregate, score.
    ///
    /// # Errors
    ///
    /// Fails when the engine is cold, the file is unreadable, or any
    /// probe/seek/decode step fails (no partial frame sets).
    pub fn analyze_video(&mut self, path: &Path) -> DetectResult<DetectionResult> {
        self.ensure_ready()?;
        let started = Instant::now();
        let byte_size = std::fs::metadata(path)?.len();
        let (probe, buffers) = sample_video_frames(path, self.config.frame_count)?;
        let metadata = MediaMetadata {
            filename: display_name(path),
            byte_size,
            width: probe.width,
            height: probe.height,
            kind: MediaKind::Video,
            duration_secs: Some(probe.duration_secs),
        };
        self.finish(&buffers, metadata, started)
    }

    /// Analyze a file, classifying it as image or video by MIME guess.
    ///
    /// # Errors
    ///
    /// Fails when the engine is cold, the guessed type is neither
    /// `image/*` nor `video/*`, or decoding fails.
    pub fn analyze_path(&mut self, path: &Path) -> DetectResult<DetectionResult> {
        self.ensure_ready()?;
        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");
        match MediaKind::from_mime(mime)? {
            MediaKind::Image => {
                let bytes = std::fs::read(path)?;
                let byte_size = bytes.len() as u64;
                self.analyze_image(&bytes, &display_name(path), byte_size)
            }
            MediaKind::Video => self.analyze_video(path),
        }
    }

    /// Analyze pre-captured frames under caller-supplied metadata.
    ///
    /// This is the pipeline core that the image and video entry points
    /// share; it is public so callers with their own capture mechanism
    /// can reuse the aggregation and scoring stages.
    ///
    /// # Errors
    ///
    /// Fails when the engine is cold.
    pub fn analyze_buffers(
        &mut self,
        buffers: &[PixelBuffer],
        metadata: MediaMetadata,
    ) -> DetectResult<DetectionResult> {
        self.ensure_ready()?;
        let started = Instant::now();
        self.finish(buffers, metadata, started)
    }

    /// Analyze every path, isolating failures: a failed asset yields a
    /// neutral LOW record instead of vanishing, and the batch continues.
    pub fn analyze_batch(&mut self, paths: &[std::path::PathBuf]) -> Vec<DetectionResult> {
        paths
            .iter()
            .map(|path| {
                self.analyze_path(path).unwrap_or_else(|error| {
                    tracing::warn!(path = %path.display(), %error, "asset failed, emitting neutral record");
                    DetectionResult::neutral(display_name(path))
                })
            })
            .collect()
    }

    /// Extraction + aggregation + scoring over owned frame buffers.
    fn finish(
        &mut self,
        buffers: &[PixelBuffer],
        metadata: MediaMetadata,
        started: Instant,
    ) -> DetectResult<DetectionResult> {
        let frames = self.extract_frame_signals(buffers);
        let temporal = match metadata.kind {
            MediaKind::Video => temporal_consistency(&frames, &self.config.temporal),
            MediaKind::Image => self.config.temporal.neutral_score,
        };

        let outcome = score(
            &frames,
            temporal,
            &metadata,
            &self.config.policy,
            &mut self.config.jitter,
        );
        tracing::debug!(
            filename = %metadata.filename,
            confidence = outcome.confidence,
            threat = %outcome.threat_level,
            "asset scored"
        );

        Ok(DetectionResult {
            id: uuid::Uuid::new_v4(),
            filename: metadata.filename,
            is_deepfake: outcome.is_deepfake,
            confidence: outcome.confidence,
            threat_level: outcome.threat_level,
            analysis: outcome.analysis,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            timestamp: chrono::Utc::now(),
        })
    }

    /// Run the extractors over each captured frame.
    ///
    /// Extractors are pure over shared buffers, so frames could be
    /// processed concurrently; sequential order is kept because the
    /// output is identical either way.
    fn extract_frame_signals(&self, buffers: &[PixelBuffer]) -> Vec<SignalSet> {
        buffers
            .iter()
            .map(|buffer| extract_signals(buffer, &self.config.signals))
            .collect()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::scoring::ThreatLevel;

    fn deterministic_config() -> EngineConfig {
        EngineConfig::default().with_jitter(Jitter::disabled())
    }

    fn ready_engine() -> DetectionEngine {
        let mut engine = DetectionEngine::new(deterministic_config());
        engine.warm_up().unwrap();
        engine
    }

    fn gray_buffer() -> PixelBuffer {
        PixelBuffer::filled(64, 64, [128, 128, 128, 255])
    }

    fn encode_png(buffer: &PixelBuffer) -> Vec<u8> {
        let img = image::RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.data().to_vec())
            .unwrap();
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        png
    }

    #[test]
    fn test_cold_engine_rejects_calls() {
        let mut engine = DetectionEngine::new(deterministic_config());
        assert_eq!(engine.state(), EngineState::Cold);
        let err = engine
            .analyze_image(&encode_png(&gray_buffer()), "photo.jpg", 1000)
            .unwrap_err();
        assert!(matches!(err, DetectError::EngineNotReady));
    }

    #[test]
    fn test_warm_up_transitions_state() {
        let mut engine = DetectionEngine::new(deterministic_config());
        engine.warm_up().unwrap();
        assert!(engine.is_ready());
    }

    #[test]
    fn test_warm_up_rejects_bad_signal_config() {
        let mut config = deterministic_config();
        config.signals.color.scale = -1.0;
        let mut engine = DetectionEngine::new(config);
        let err = engine.warm_up().unwrap_err();
        assert!(matches!(err, DetectError::InvalidConfig { .. }));
        assert!(!engine.is_ready());
    }

    #[test]
    fn test_warm_up_rejects_bad_temporal_weights() {
        let mut config = deterministic_config();
        config.temporal.skin_weight = 0.9;
        let mut engine = DetectionEngine::new(config);
        assert!(engine.warm_up().is_err());
    }

    #[test]
    fn test_warm_up_rejects_zero_frame_count() {
        let config = deterministic_config().with_frame_count(0);
        let mut engine = DetectionEngine::new(config);
        assert!(engine.warm_up().is_err());
    }

    #[test]
    fn test_uniform_gray_image_end_to_end() {
        let mut engine = ready_engine();
        let result = engine
            .analyze_image(&encode_png(&gray_buffer()), "photo.jpg", 50 * 1024)
            .unwrap();

        // Uniform gray: no artifacts, perfect color consistency, zero
        // contrast. Only the low-quality rule fires, leaving confidence
        // near the policy base.
        let policy = &engine.config().policy;
        let expected = policy.base_suspicion + 3.0;
        assert!((result.confidence - expected).abs() < 1e-9);
        assert_eq!(result.threat_level, ThreatLevel::Low);
        assert!(!result.is_deepfake);
        assert!(result.analysis.artifact_detection.abs() < f64::EPSILON);
        assert!(result.analysis.image_quality.abs() < 1e-6);
        assert!(result.analysis.face_detection.abs() < f64::EPSILON);
        assert!((result.analysis.neural_network_confidence - result.confidence).abs() < 1e-12);
        assert!(result.processing_time_ms >= 0.0);
    }

    #[test]
    fn test_deepfake_named_video_end_to_end() {
        let mut engine = ready_engine();
        let image_result = engine
            .analyze_image(&encode_png(&gray_buffer()), "photo.jpg", 50 * 1024)
            .unwrap();

        let metadata = MediaMetadata {
            filename: "deepfake_test.mp4".to_string(),
            byte_size: 50 * 1024,
            width: 64,
            height: 64,
            kind: MediaKind::Video,
            duration_secs: Some(10.0),
        };
        let video_result = engine
            .analyze_buffers(&[gray_buffer()], metadata)
            .unwrap();

        // "deepfake" and "fake" both match; single frame keeps temporal
        // neutral so no video penalty applies.
        let bonus = 2.0 * engine.config().policy.suspect_keyword_bonus;
        assert!(
            (video_result.confidence - (image_result.confidence + bonus)).abs() < 1e-9
        );
        assert!(video_result.confidence > engine.config().policy.decision_threshold);
        assert!(video_result.is_deepfake);
    }

    #[test]
    fn test_single_frame_video_neutral_temporal() {
        let mut engine = ready_engine();
        let metadata = MediaMetadata {
            filename: "clip.mp4".to_string(),
            byte_size: 50 * 1024,
            width: 64,
            height: 64,
            kind: MediaKind::Video,
            duration_secs: Some(10.0),
        };
        let result = engine.analyze_buffers(&[gray_buffer()], metadata).unwrap();
        assert!(
            (result.analysis.temporal_consistency - engine.config().temporal.neutral_score).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_analyze_path_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("document.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let mut engine = ready_engine();
        let err = engine.analyze_path(&path).unwrap_err();
        assert!(matches!(err, DetectError::UnsupportedType { .. }));
    }

    #[test]
    fn test_analyze_path_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        std::fs::write(&path, encode_png(&gray_buffer())).unwrap();

        let mut engine = ready_engine();
        let result = engine.analyze_path(&path).unwrap();
        assert_eq!(result.filename, "sample.png");
        assert_eq!(result.threat_level, ThreatLevel::Low);
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        std::fs::write(&good, encode_png(&gray_buffer())).unwrap();
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"not a png").unwrap();
        let unsupported = dir.path().join("notes.txt");
        std::fs::write(&unsupported, b"hello").unwrap();

        let mut engine = ready_engine();
        let results = engine.analyze_batch(&[good, broken, unsupported]);

        assert_eq!(results.len(), 3);
        assert!(results[0].confidence > 0.0);
        // Failed assets still produce neutral LOW records
        assert!(results[1].confidence.abs() < f64::EPSILON);
        assert_eq!(results[1].threat_level, ThreatLevel::Low);
        assert_eq!(results[2].filename, "notes.txt");
        assert!(!results[2].is_deepfake);
    }

    #[test]
    fn test_disabled_jitter_is_reproducible() {
        let mut engine = ready_engine();
        let png = encode_png(&gray_buffer());
        let first = engine.analyze_image(&png, "photo.jpg", 50 * 1024).unwrap();
        let second = engine.analyze_image(&png, "photo.jpg", 50 * 1024).unwrap();
        assert!((first.confidence - second.confidence).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seeded_jitter_bounded() {
        let policy = ScoringPolicy::balanced();
        let amplitude = policy.jitter_amplitude;
        let config = EngineConfig::default().with_jitter(Jitter::seeded(amplitude, 1234));
        let mut engine = DetectionEngine::new(config);
        engine.warm_up().unwrap();

        let mut baseline_engine = ready_engine();
        let png = encode_png(&gray_buffer());
        let baseline = baseline_engine
            .analyze_image(&png, "photo.jpg", 50 * 1024)
            .unwrap();

        for _ in 0..20 {
            let jittered = engine.analyze_image(&png, "photo.jpg", 50 * 1024).unwrap();
            assert!((jittered.confidence - baseline.confidence).abs() <= amplitude);
        }
    }
}
