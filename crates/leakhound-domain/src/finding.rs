//! Finding module - the persistable record for an accepted verdict

use crate::verdict::Confidence;
use std::fmt;

/// Maximum length, in characters, of the persisted snippet and reasoning fields
pub const MAX_FIELD_CHARS: usize = 1024;

/// Unique identifier for a finding based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for temporal queries
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FindingId(u128);

impl FindingId {
    /// Generate a new UUIDv7-based FindingId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a FindingId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a FindingId from a UUIDv7 string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for FindingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A confirmed potential leak, ready for persistence
///
/// Findings exist only for candidates whose verdict passed the confidence
/// gate (High or Medium). The snippet and reasoning fields are truncated to
/// [`MAX_FIELD_CHARS`] characters at construction; truncation is silent and
/// deterministic. Confidence casing is normalized here, regardless of what
/// the classifier produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Unique identifier
    pub id: FindingId,

    /// Repository the leak was found in
    pub repo_name: String,

    /// File path within the repository
    pub file_path: String,

    /// The matched secret value, truncated to [`MAX_FIELD_CHARS`] chars
    pub secret_snippet: String,

    /// Confidence level (always High or Medium)
    pub confidence: Confidence,

    /// Classifier reasoning, truncated to [`MAX_FIELD_CHARS`] chars
    pub reasoning: String,

    /// When the scan produced this finding (ISO-8601 UTC, microsecond
    /// precision, trailing Z)
    pub scan_timestamp: String,
}

impl Finding {
    /// Create a new finding, enforcing the field-length limits
    pub fn new(
        repo_name: impl Into<String>,
        file_path: impl Into<String>,
        secret_snippet: &str,
        confidence: Confidence,
        reasoning: &str,
        scan_timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: FindingId::new(),
            repo_name: repo_name.into(),
            file_path: file_path.into(),
            secret_snippet: truncate_chars(secret_snippet, MAX_FIELD_CHARS),
            confidence,
            reasoning: truncate_chars(reasoning, MAX_FIELD_CHARS),
            scan_timestamp: scan_timestamp.into(),
        }
    }
}

/// Take the first `max` characters of a string
///
/// Character-based, never splits a UTF-8 sequence.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        Option::None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_id_chronological() {
        let id1 = FindingId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = FindingId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
    }

    #[test]
    fn test_finding_id_display_and_parse() {
        let id = FindingId::new();
        let id_str = id.to_string();

        // UUIDv7 strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(id_str.len(), 36);

        let parsed = FindingId::from_string(&id_str).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_finding_id_invalid_string() {
        assert!(FindingId::from_string("not-a-valid-uuid").is_err());
        assert!(FindingId::from_string("").is_err());
    }

    #[test]
    fn test_finding_truncates_long_fields() {
        let long_secret = "s".repeat(2000);
        let long_reasoning = "r".repeat(2000);

        let finding = Finding::new(
            "org/repo",
            "cfg.yaml",
            &long_secret,
            Confidence::High,
            &long_reasoning,
            "2026-01-01T00:00:00.000000Z",
        );

        assert_eq!(finding.secret_snippet.chars().count(), MAX_FIELD_CHARS);
        assert_eq!(finding.reasoning.chars().count(), MAX_FIELD_CHARS);
    }

    #[test]
    fn test_finding_short_fields_untouched() {
        let finding = Finding::new(
            "org/repo",
            "cfg.yaml",
            "AbCdEf1234567890XyZ",
            Confidence::Medium,
            "Looks real.",
            "2026-01-01T00:00:00.000000Z",
        );

        assert_eq!(finding.secret_snippet, "AbCdEf1234567890XyZ");
        assert_eq!(finding.reasoning, "Looks real.");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Multi-byte characters must not be split
        let s = "é".repeat(1500);
        let truncated = truncate_chars(&s, MAX_FIELD_CHARS);
        assert_eq!(truncated.chars().count(), MAX_FIELD_CHARS);
        assert!(truncated.chars().all(|c| c == 'é'));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: truncation never exceeds the limit and preserves prefixes
        #[test]
        fn test_truncate_bounded(s in ".*") {
            let truncated = truncate_chars(&s, MAX_FIELD_CHARS);
            prop_assert!(truncated.chars().count() <= MAX_FIELD_CHARS);
            prop_assert!(s.starts_with(&truncated));
        }

        /// Property: truncation is idempotent
        #[test]
        fn test_truncate_idempotent(s in ".*") {
            let once = truncate_chars(&s, MAX_FIELD_CHARS);
            let twice = truncate_chars(&once, MAX_FIELD_CHARS);
            prop_assert_eq!(once, twice);
        }

        /// Property: FindingId round-trips through its string representation
        #[test]
        fn test_finding_id_string_roundtrip(value: u128) {
            let id = FindingId::from_value(value);
            let id_str = id.to_string();

            match FindingId::from_string(&id_str) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
