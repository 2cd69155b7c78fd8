//! Parse free-form classifier output into a structured verdict
//!
//! The two-line CONFIDENCE/REASONING contract is informal and the model is
//! external, so the parser is deliberately tolerant: malformed output always
//! degrades to a verdict, never to an error.

use leakhound_domain::Verdict;
use tracing::warn;

/// Reasoning recorded when the confidence line is missing or malformed
///
/// Paired with a `Low` label rather than `None`: a format error means
/// "needs human review", not "confirmed negative".
pub const FORMAT_ERROR_REASONING: &str = "AI response format error.";

/// Reasoning recorded when the confidence line parsed but no reasoning followed
pub const MISSING_REASONING: &str = "AI response missing reasoning.";

/// Reasoning recorded when a second line is present but not a `REASONING:` line
pub const UNPARSED_REASONING: &str = "Parsing error";

/// Parse raw classifier output into a verdict
///
/// Line 0 must start with `CONFIDENCE:`; the label is the trimmed text after
/// the first colon, preserved literally (gating resolves it case-insensitively
/// later). Line 1, when present and starting with `REASONING:`, supplies the
/// reasoning; present without the prefix degrades to [`UNPARSED_REASONING`],
/// absent to [`MISSING_REASONING`].
pub fn parse_verdict(raw: &str) -> Verdict {
    let mut lines = raw.trim().lines();

    let label = match lines.next().and_then(|l| l.strip_prefix("CONFIDENCE:")) {
        Some(rest) => rest.trim(),
        None => {
            warn!("Classifier response format invalid: {:?}", raw);
            return Verdict::new("Low", FORMAT_ERROR_REASONING);
        }
    };

    let reasoning = match lines.next() {
        Some(line) => match line.strip_prefix("REASONING:") {
            Some(rest) => rest.trim().to_string(),
            None => UNPARSED_REASONING.to_string(),
        },
        None => MISSING_REASONING.to_string(),
    };

    Verdict::new(label, reasoning)
}
