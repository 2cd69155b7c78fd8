//! Verdict module - the confidence judgment produced for a candidate

use std::fmt;

/// Confidence level assigned by the classifier
///
/// The classifier is asked to answer with exactly one of these four tokens.
/// `Low` and `None` verdicts are recorded but never persisted as findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    /// Very likely a real, active credential
    High,
    /// Plausibly a real credential
    Medium,
    /// Probably a false positive, flagged for human review
    Low,
    /// Confirmed negative (placeholder, example, degraded analysis)
    None,
}

impl Confidence {
    /// Parse a free-form label, case-insensitively
    ///
    /// Returns `Option::None` for anything outside the four known tokens.
    /// The caller keeps the literal label for the record either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use leakhound_domain::Confidence;
    ///
    /// assert_eq!(Confidence::from_label("high"), Some(Confidence::High));
    /// assert_eq!(Confidence::from_label(" MEDIUM "), Some(Confidence::Medium));
    /// assert_eq!(Confidence::from_label("certain"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            "none" => Some(Confidence::None),
            _ => Option::None,
        }
    }

    /// Canonical string form, used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
            Confidence::None => "None",
        }
    }

    /// Whether a verdict at this level should be persisted as a finding
    pub fn is_reportable(&self) -> bool {
        matches!(self, Confidence::High | Confidence::Medium)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured judgment for a single candidate
///
/// `label` preserves the literal confidence token the classifier produced,
/// even when it falls outside the known set; gating resolves it through
/// [`Confidence::from_label`]. Every candidate yields exactly one verdict -
/// degraded defaults are substituted when the classifier output cannot be
/// parsed, so a verdict is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Literal confidence token from the classifier output
    pub label: String,

    /// Free-text justification for the confidence level
    pub reasoning: String,
}

impl Verdict {
    /// Create a verdict from a literal label and reasoning text
    pub fn new(label: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reasoning: reasoning.into(),
        }
    }

    /// Resolve the literal label against the known confidence levels
    pub fn confidence(&self) -> Option<Confidence> {
        Confidence::from_label(&self.label)
    }

    /// The confidence gate: accepted iff the label resolves to High or Medium
    ///
    /// Pure function of the label; unknown labels are rejected.
    pub fn is_reportable(&self) -> bool {
        self.confidence().is_some_and(|c| c.is_reportable())
    }
}
