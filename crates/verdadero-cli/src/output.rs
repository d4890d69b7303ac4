//! Terminal rendering for scan results.

use console::style;
use verdadero::{DetectionResult, ThreatLevel};

/// One formatted result line: threat tag, confidence, deepfake marker,
/// filename.
#[must_use]
pub fn format_result_line(result: &DetectionResult) -> String {
    let tag = threat_tag(result.threat_level);
    let marker = if result.is_deepfake {
        style("DEEPFAKE").red().bold().to_string()
    } else {
        style("ok").dim().to_string()
    };
    format!(
        "{tag:>8}  {confidence:>5.1}  {marker:>8}  {name}",
        confidence = result.confidence,
        name = result.filename,
    )
}

/// Colored threat token.
#[must_use]
pub fn threat_tag(level: ThreatLevel) -> String {
    match level {
        ThreatLevel::Low => style("LOW").green().to_string(),
        ThreatLevel::Medium => style("MEDIUM").yellow().to_string(),
        ThreatLevel::High => style("HIGH").red().to_string(),
        ThreatLevel::Critical => style("CRITICAL").red().bold().to_string(),
    }
}

/// Batch summary: counts per threat level and flagged assets.
#[must_use]
pub fn format_summary(results: &[DetectionResult]) -> String {
    let flagged = results.iter().filter(|r| r.is_deepfake).count();
    let mut counts = [0usize; 4];
    for result in results {
        counts[result.threat_level as usize] += 1;
    }
    format!(
        "{} scanned: {} low, {} medium, {} high, {} critical ({} flagged)",
        results.len(),
        counts[0],
        counts[1],
        counts[2],
        counts[3],
        flagged,
    )
}
