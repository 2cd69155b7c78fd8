//! Candidate module - a potential leak discovered by the corpus hunt

/// A candidate leak: a matched substring plus the text it was found in
///
/// Candidates are produced by the hunt stage and are immutable once
/// constructed. The `secret_value` is never empty when a candidate reaches the
/// pipeline; sources drop rows without a usable match before handing them over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Repository the file belongs to
    pub repo_name: String,

    /// Path of the file within the repository
    pub file_path: String,

    /// Full file content the match was found in (may be empty when the
    /// source could not supply it)
    pub content: String,

    /// The matched substring suspected to be a credential
    pub secret_value: String,
}

impl Candidate {
    /// Create a new candidate
    pub fn new(
        repo_name: impl Into<String>,
        file_path: impl Into<String>,
        content: impl Into<String>,
        secret_value: impl Into<String>,
    ) -> Self {
        Self {
            repo_name: repo_name.into(),
            file_path: file_path.into(),
            content: content.into(),
            secret_value: secret_value.into(),
        }
    }

    /// Short display label for logs
    pub fn location(&self) -> String {
        format!("{}/{}", self.repo_name, self.file_path)
    }
}
