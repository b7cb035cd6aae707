//! Rider Repository (the rider registry)
//!
//! Reads and signup-time creation only. Availability flips
//! (`busy`/`available`) happen exclusively inside the dispatch
//! transactions, where they commit together with the order mutation —
//! a standalone flip could break the busy⟺current-order invariant.

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::RiderProfile;

#[derive(Clone)]
pub struct RiderRepository {
    base: BaseRepository,
}

impl RiderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a rider profile for `account` (called at rider signup)
    ///
    /// New riders start available with no current order.
    pub async fn create(&self, account: RecordId, name: &str) -> RepoResult<RiderProfile> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE rider SET
                    account = $account,
                    name = $name,
                    status = 'available',
                    current_order = NONE,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("account", account))
            .bind(("name", name.to_string()))
            .bind(("created_at", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<RiderProfile> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create rider profile".to_string()))
    }

    /// Find a rider profile by its record id
    pub async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<RiderProfile>> {
        let profile: Option<RiderProfile> = self.base.db().select(id).await?;
        Ok(profile)
    }

    /// Find the rider profile backing an account
    pub async fn find_by_account(&self, account: RecordId) -> RepoResult<Option<RiderProfile>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM rider WHERE account = $account LIMIT 1")
            .bind(("account", account))
            .await?;
        let profiles: Vec<RiderProfile> = result.take(0)?;
        Ok(profiles.into_iter().next())
    }

    /// All riders currently available, ordered by name
    pub async fn list_available(&self) -> RepoResult<Vec<RiderProfile>> {
        let profiles: Vec<RiderProfile> = self
            .base
            .db()
            .query("SELECT * FROM rider WHERE status = 'available' ORDER BY name")
            .await?
            .take(0)?;
        Ok(profiles)
    }

    /// Total number of riders
    pub async fn count(&self) -> RepoResult<i64> {
        self.base.count_table("rider").await
    }

    /// Number of riders currently available
    pub async fn count_available(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM rider WHERE status = 'available' GROUP ALL")
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}
