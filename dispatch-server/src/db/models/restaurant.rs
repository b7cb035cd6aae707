//! Restaurant Model

use serde::{Deserialize, Serialize};
use shared::types::Timestamp;
use surrealdb::RecordId;

use super::serde_helpers;

/// Restaurant ID type
pub type RestaurantId = RecordId;

/// Restaurant model matching the `restaurant` table
///
/// Owned by exactly one manager account; created at manager signup and
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RestaurantId>,
    pub restaurant_name: String,
    pub signature_dish: String,
    /// Owning manager account
    #[serde(with = "serde_helpers::record_id")]
    pub manager: RecordId,
    pub created_at: Timestamp,
}
