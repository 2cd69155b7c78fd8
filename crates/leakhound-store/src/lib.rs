//! Leakhound Storage Layer
//!
//! SQLite-backed corpus hunt and finding persistence.
//!
//! # Architecture
//!
//! One `SqliteStore` serves both boundary traits from `leakhound-domain`:
//! `CandidateSource` runs the configurable hunt query against the staging
//! table, and `FindingSink` writes accepted findings record by record so a
//! single bad row cannot sink the batch.
//!
//! # Examples
//!
//! ```no_run
//! use leakhound_store::SqliteStore;
//!
//! let store = SqliteStore::open(":memory:").unwrap();
//! // Store is now ready for hunt and persistence operations
//! ```

#![warn(missing_docs)]

use leakhound_domain::traits::{CandidateSource, FindingSink, HuntError, InsertFailure};
use leakhound_domain::{Candidate, Confidence, Finding, FindingId};
use rusqlite::{params, Connection, ErrorCode};
use std::path::Path;
use thiserror::Error;

/// Hunt query used when the deployment does not configure its own
pub const DEFAULT_HUNT_QUERY: &str =
    "SELECT repo_name, file_path, content, secret_value FROM corpus_candidates ORDER BY rowid";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based candidate source and finding sink
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Callers share a store across
/// tasks behind a mutex, or open one store per thread.
pub struct SqliteStore {
    conn: Connection,
    hunt_query: String,
}

impl SqliteStore {
    /// Open a store at the given database path and initialize the schema
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use leakhound_store::SqliteStore;
    ///
    /// let store = SqliteStore::open("leakhound.db").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self {
            conn,
            hunt_query: DEFAULT_HUNT_QUERY.to_string(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Replace the hunt query this source runs
    ///
    /// The query must produce the columns `repo_name`, `file_path`,
    /// `content`, `secret_value` in that order.
    pub fn with_hunt_query(mut self, query: impl Into<String>) -> Self {
        self.hunt_query = query.into();
        self
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Stage a candidate row for the hunt to discover
    pub fn stage_candidate(&mut self, candidate: &Candidate) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO corpus_candidates (repo_name, file_path, content, secret_value)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &candidate.repo_name,
                &candidate.file_path,
                &candidate.content,
                &candidate.secret_value,
            ],
        )?;
        Ok(())
    }

    /// Number of persisted findings
    pub fn finding_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM findings", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All persisted findings, ordered by scan timestamp then id
    pub fn list_findings(&self) -> Result<Vec<Finding>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, repo_name, file_path, secret_snippet, ai_confidence, ai_reasoning, scan_timestamp
             FROM findings ORDER BY scan_timestamp, id",
        )?;

        let findings = stmt
            .query_map([], |row| {
                let id_bytes: Vec<u8> = row.get(0)?;
                let id = Self::bytes_to_finding_id(&id_bytes).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Blob,
                        Box::new(e),
                    )
                })?;

                let label: String = row.get(4)?;
                let confidence = Confidence::from_label(&label).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(StoreError::InvalidData(format!(
                            "Unknown confidence label: {}",
                            label
                        ))),
                    )
                })?;

                Ok(Finding {
                    id,
                    repo_name: row.get(1)?,
                    file_path: row.get(2)?,
                    secret_snippet: row.get(3)?,
                    confidence,
                    reasoning: row.get(5)?,
                    scan_timestamp: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(findings)
    }

    /// Convert FindingId to bytes for storage
    fn finding_id_to_bytes(id: FindingId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to FindingId
    fn bytes_to_finding_id(bytes: &[u8]) -> Result<FindingId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for FindingId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(FindingId::from_value(u128::from_be_bytes(arr)))
    }
}

/// Map a rusqlite failure to the hunt's fatal error taxonomy
///
/// Query preparation and column-shape failures carry the failing query text
/// so operators can see exactly what was run.
fn map_hunt_error(e: rusqlite::Error, query: &str) -> HuntError {
    match e {
        rusqlite::Error::SqlInputError { msg, .. } => HuntError::MalformedQuery {
            query: query.to_string(),
            message: msg,
        },
        rusqlite::Error::InvalidColumnIndex(_)
        | rusqlite::Error::InvalidColumnName(_)
        | rusqlite::Error::InvalidColumnType(..) => HuntError::MalformedQuery {
            query: query.to_string(),
            message: e.to_string(),
        },
        rusqlite::Error::SqliteFailure(inner, msg) => {
            let message = msg.unwrap_or_else(|| inner.to_string());
            match inner.code {
                ErrorCode::PermissionDenied
                | ErrorCode::ReadOnly
                | ErrorCode::AuthorizationForStatementDenied => {
                    HuntError::PermissionDenied(message)
                }
                _ => HuntError::Source(message),
            }
        }
        other => HuntError::Source(other.to_string()),
    }
}

impl CandidateSource for SqliteStore {
    fn fetch_candidates(&self) -> Result<Vec<Candidate>, HuntError> {
        let mut stmt = self
            .conn
            .prepare(&self.hunt_query)
            .map_err(|e| map_hunt_error(e, &self.hunt_query))?;

        let rows = stmt
            .query_map([], |row| {
                let repo_name: String = row.get(0)?;
                let file_path: String = row.get(1)?;
                let content: Option<String> = row.get(2)?;
                let secret_value: Option<String> = row.get(3)?;
                Ok((repo_name, file_path, content, secret_value))
            })
            .map_err(|e| map_hunt_error(e, &self.hunt_query))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_hunt_error(e, &self.hunt_query))?;

        // Rows without a usable secret value never become candidates
        let candidates = rows
            .into_iter()
            .filter_map(|(repo_name, file_path, content, secret_value)| {
                let secret_value = secret_value?;
                if secret_value.is_empty() {
                    return Option::None;
                }
                Some(Candidate::new(
                    repo_name,
                    file_path,
                    content.unwrap_or_default(),
                    secret_value,
                ))
            })
            .collect();

        Ok(candidates)
    }
}

impl FindingSink for SqliteStore {
    type Error = StoreError;

    fn insert_findings(&mut self, findings: &[Finding]) -> Result<Vec<InsertFailure>, StoreError> {
        let mut failures = Vec::new();

        for (index, finding) in findings.iter().enumerate() {
            let result = self.conn.execute(
                "INSERT INTO findings (id, repo_name, file_path, secret_snippet, ai_confidence, ai_reasoning, scan_timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    Self::finding_id_to_bytes(finding.id),
                    &finding.repo_name,
                    &finding.file_path,
                    &finding.secret_snippet,
                    finding.confidence.as_str(),
                    &finding.reasoning,
                    &finding.scan_timestamp,
                ],
            );

            if let Err(e) = result {
                failures.push(InsertFailure {
                    index,
                    message: e.to_string(),
                });
            }
        }

        Ok(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::open(":memory:").unwrap()
    }

    fn finding(repo: &str, secret: &str) -> Finding {
        Finding::new(
            repo,
            "cfg.yaml",
            secret,
            Confidence::High,
            "Looks like a live credential.",
            "2026-08-31T12:00:00.000000Z",
        )
    }

    #[test]
    fn test_fetch_returns_staged_candidates_in_order() {
        let mut store = store();
        let first = Candidate::new("r1", "a.py", "key = sk_live_aaa", "sk_live_aaa");
        let second = Candidate::new("r2", "b.py", "key = sk_live_bbb", "sk_live_bbb");
        store.stage_candidate(&first).unwrap();
        store.stage_candidate(&second).unwrap();

        let candidates = store.fetch_candidates().unwrap();
        assert_eq!(candidates, vec![first, second]);
    }

    #[test]
    fn test_fetch_skips_rows_without_secret_value() {
        let mut store = store();
        store
            .conn
            .execute(
                "INSERT INTO corpus_candidates (repo_name, file_path, content, secret_value)
                 VALUES ('r1', 'a.py', 'x', NULL), ('r1', 'b.py', 'y', ''), ('r1', 'c.py', 'z', 'sk_live_ok')",
                [],
            )
            .unwrap();

        let candidates = store.fetch_candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].file_path, "c.py");
    }

    #[test]
    fn test_fetch_treats_null_content_as_empty() {
        let mut store = store();
        store
            .conn
            .execute(
                "INSERT INTO corpus_candidates (repo_name, file_path, content, secret_value)
                 VALUES ('r1', 'a.py', NULL, 'sk_live_ok')",
                [],
            )
            .unwrap();

        let candidates = store.fetch_candidates().unwrap();
        assert_eq!(candidates[0].content, "");
    }

    #[test]
    fn test_malformed_hunt_query_carries_query_text() {
        let store = store().with_hunt_query("SELECT nope FROM nowhere");

        let err = store.fetch_candidates().unwrap_err();
        match err {
            HuntError::MalformedQuery { query, message } => {
                assert_eq!(query, "SELECT nope FROM nowhere");
                assert!(message.contains("nowhere"), "message was {:?}", message);
            }
            other => panic!("expected MalformedQuery, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_batch_persists_all_findings() {
        let mut store = store();
        let batch = vec![finding("r1", "sk_live_one"), finding("r2", "sk_live_two")];

        let failures = store.insert_findings(&batch).unwrap();
        assert!(failures.is_empty());
        assert_eq!(store.finding_count().unwrap(), 2);

        let listed = store.list_findings().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|f| f.secret_snippet == "sk_live_one"));
    }

    #[test]
    fn test_duplicate_id_fails_only_that_record() {
        let mut store = store();
        let good = finding("r1", "sk_live_one");
        let duplicate = good.clone();
        let other = finding("r2", "sk_live_two");

        let failures = store
            .insert_findings(&[good, duplicate, other])
            .unwrap();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].index, 1);
        assert!(failures[0].message.to_lowercase().contains("unique"));
        assert_eq!(store.finding_count().unwrap(), 2);
    }

    #[test]
    fn test_findings_roundtrip_all_fields() {
        let mut store = store();
        let original = finding("org/repo", "AbCdEf1234567890XyZ");

        store.insert_findings(std::slice::from_ref(&original)).unwrap();
        let listed = store.list_findings().unwrap();

        assert_eq!(listed, vec![original]);
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leakhound.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.insert_findings(&[finding("r1", "sk_live_one")]).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.finding_count().unwrap(), 1);
    }

    #[test]
    fn test_map_hunt_error_classifies_permission_codes() {
        let ffi = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_PERM);
        let err = rusqlite::Error::SqliteFailure(ffi, Some("access denied".to_string()));

        match map_hunt_error(err, "SELECT 1") {
            HuntError::PermissionDenied(msg) => assert_eq!(msg, "access denied"),
            other => panic!("expected PermissionDenied, got {:?}", other),
        }
    }

    #[test]
    fn test_map_hunt_error_defaults_to_source() {
        let ffi = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY);
        let err = rusqlite::Error::SqliteFailure(ffi, Option::None);

        assert!(matches!(
            map_hunt_error(err, "SELECT 1"),
            HuntError::Source(_)
        ));
    }

    #[test]
    fn test_column_shape_errors_are_malformed_query() {
        let err = rusqlite::Error::InvalidColumnIndex(7);
        assert!(matches!(
            map_hunt_error(err, "SELECT 1"),
            HuntError::MalformedQuery { .. }
        ));
    }
}
