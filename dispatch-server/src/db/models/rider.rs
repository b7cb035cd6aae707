//! Rider Profile Model

use serde::{Deserialize, Serialize};
use shared::types::{RiderStatus, Timestamp};
use surrealdb::RecordId;

use super::serde_helpers;

/// Rider profile ID type
pub type RiderId = RecordId;

/// Rider profile matching the `rider` table
///
/// One-to-one with a rider account. Invariant: `status == Busy` if and
/// only if `current_order` is set — both fields only ever change together
/// inside the dispatch transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiderProfile {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RiderId>,
    /// Backing account
    #[serde(with = "serde_helpers::record_id")]
    pub account: RecordId,
    pub name: String,
    pub status: RiderStatus,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub current_order: Option<RecordId>,
    pub created_at: Timestamp,
}

impl RiderProfile {
    /// Id as a `table:key` string, empty if unsaved
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}
