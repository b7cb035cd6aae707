//! Order Model

use serde::{Deserialize, Serialize};
use shared::types::{OrderStatus, Timestamp};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order ID type (internal record id, distinct from the caller-supplied
/// human-readable `order_id` field)
pub type OrderId = RecordId;

/// Order model matching the `order` table
///
/// The central entity. Created at status PREP with no rider; mutated only
/// by assignment and status advancement; never deleted. `assigned_rider`
/// is set iff the order has been assigned (PREP-with-assignment is a valid
/// transient state — assignment precedes pickup).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    /// Caller-supplied human-readable identifier, unique system-wide
    pub order_id: String,
    pub items: String,
    /// Preparation estimate in minutes, within [1, 120]
    pub prep_time: i64,
    pub status: OrderStatus,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub assigned_rider: Option<RecordId>,
    /// Estimated completion time set at assignment; overwritten with the
    /// actual completion time when the order is delivered
    #[serde(default)]
    pub dispatch_time: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Id as a `table:key` string, empty if unsaved
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}
