//! Confidence gate and finding builder

use chrono::Utc;
use leakhound_domain::{Candidate, Finding, Verdict};

/// Current UTC instant as ISO-8601 with microsecond precision and trailing Z
pub fn scan_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Apply the confidence gate and build a finding for accepted verdicts
///
/// Returns `None` for Low/None/unknown labels. Field-length limits and
/// confidence-casing normalization are enforced by the `Finding` constructor.
pub fn evaluate(candidate: &Candidate, verdict: &Verdict) -> Option<Finding> {
    let confidence = verdict.confidence().filter(|c| c.is_reportable())?;

    Some(Finding::new(
        &candidate.repo_name,
        &candidate.file_path,
        &candidate.secret_value,
        confidence,
        &verdict.reasoning,
        scan_timestamp(),
    ))
}
