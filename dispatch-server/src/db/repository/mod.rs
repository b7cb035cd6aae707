//! Repository Module
//!
//! Single-entity read/create operations against SurrealDB. The compound
//! cross-entity mutations (rider assignment, status advancement) live in
//! [`crate::dispatch`] as transaction scripts so that their invariants hold
//! under concurrency.

// Identity
pub mod account;

// Restaurants
pub mod restaurant;

// Dispatch domain
pub mod order;
pub mod rider;

// Re-exports
pub use account::AccountRepository;
pub use order::OrderRepository;
pub use restaurant::RestaurantRepository;
pub use rider::RiderRepository;

use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// API 边界接受 "table:id" 字符串或裸 key；parse_record 归一化为 RecordId
// 并校验表名，避免把 rider id 误当 order id 使用。

/// Parse an id string into a `RecordId` belonging to `table`.
///
/// Accepts both `"table:key"` and bare `"key"` forms.
pub fn parse_record(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.trim().is_empty() {
        return Err(RepoError::Validation(format!("{table} id is required")));
    }
    let record: RecordId = if id.contains(':') {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {id}")))?
    } else {
        RecordId::from_table_key(table, id)
    };
    if record.table() != table {
        return Err(RepoError::Validation(format!(
            "Invalid {table} ID: {id}"
        )));
    }
    Ok(record)
}

/// Row shape for `SELECT count() ... GROUP ALL`
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: i64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Count all rows of `table`
    pub(crate) async fn count_table(&self, table: &str) -> RepoResult<i64> {
        let mut result = self
            .db
            .query(format!("SELECT count() FROM {table} GROUP ALL"))
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_record_accepts_both_forms() {
        let a = parse_record("order", "order:abc123").unwrap();
        let b = parse_record("order", "abc123").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_record_rejects_wrong_table() {
        assert!(parse_record("order", "rider:abc123").is_err());
        assert!(parse_record("order", "").is_err());
    }
}
