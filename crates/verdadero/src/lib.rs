//! Verdadero: media authenticity heuristic scoring engine.
//!
//! Decodes images and sampled video frames into pixel buffers, runs a set
//! of independent pixel-level analyzers over them, and combines the
//! resulting signals with coarse file metadata into a clamped confidence
//! score and an ordered threat level.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   VERDADERO Pipeline                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌────────┐   ┌────────────┐   ┌───────────┐   ┌────────────┐   │
//! │  │ Source │──►│ Extractors │──►│ Temporal  │──►│  Scorer    │   │
//! │  │ decode │   │ (7 signal) │   │ (video)   │   │ rule table │   │
//! │  └────────┘   └────────────┘   └───────────┘   └────────────┘   │
//! │                                                      │          │
//! │                                            DetectionResult      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows strictly left to right; no component calls back upstream.
//! Extractors are pure functions over shared buffers and never fail:
//! degenerate inputs resolve to neutral fallbacks, keeping the scorer
//! total.
//!
//! # Example
//!
//! ```no_run
//! use verdadero::{DetectionEngine, EngineConfig, Jitter};
//!
//! let config = EngineConfig::default().with_jitter(Jitter::disabled());
//! let mut engine = DetectionEngine::new(config);
//! engine.warm_up()?;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let result = engine.analyze_image(&bytes, "photo.jpg", bytes.len() as u64)?;
//! println!("{} -> {} ({:.1})", result.filename, result.threat_level, result.confidence);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

/// Detection Engine: per-asset pipeline, readiness state, batch analysis.
pub mod engine;

/// Injectable bounded score perturbation.
pub mod jitter;

/// Decoded raster pixel data.
pub mod pixel;

/// Detection records and the JSON export shape.
pub mod report;

mod result;

/// Suspicion Scorer: rule table, policies, threat classification.
pub mod scoring;

/// Signal Extractors: independent pixel-buffer heuristics.
pub mod signals;

/// Pixel Buffer Source: decoding and video frame sampling.
pub mod source;

/// Frame Aggregator: temporal consistency for video.
pub mod temporal;

pub use engine::{DetectionEngine, EngineConfig, EngineState};
pub use jitter::Jitter;
pub use pixel::PixelBuffer;
pub use report::{
    export_results, import_results, to_export_json, DetectionAnalysis, DetectionResult,
};
pub use result::{DetectError, DetectResult};
pub use scoring::{
    score, ScoreOutcome, ScoringPolicy, SignalKind, SignalRule, ThreatLadder, ThreatLevel,
};
pub use signals::{extract_signals, SignalConfig, SignalSet};
pub use source::{
    decode_image, probe_video, sample_video_frames, MediaKind, MediaMetadata, VideoProbe,
    DEFAULT_FRAME_COUNT,
};
pub use temporal::{temporal_consistency, TemporalConfig};
