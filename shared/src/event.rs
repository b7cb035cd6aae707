//! Broadcast event payloads
//!
//! Events pushed to connected observers when the ledger or registry
//! changes. Delivery is best-effort, at-most-once: no persistence, no
//! replay, no acknowledgment. Observers that connect late catch up via the
//! pull endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::OrderView;

/// The three event kinds fanned out to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "order-created")]
    OrderCreated,
    #[serde(rename = "order-status-changed")]
    OrderStatusChanged,
    #[serde(rename = "rider-assigned")]
    RiderAssigned,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::OrderCreated => f.write_str("order-created"),
            EventKind::OrderStatusChanged => f.write_str("order-status-changed"),
            EventKind::RiderAssigned => f.write_str("rider-assigned"),
        }
    }
}

/// A single broadcast event carrying the full updated order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchEvent {
    pub kind: EventKind,
    pub order: OrderView,
    /// Set for [`EventKind::RiderAssigned`]: the assigned rider profile id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rider_id: Option<String>,
}

impl DispatchEvent {
    pub fn order_created(order: OrderView) -> Self {
        Self {
            kind: EventKind::OrderCreated,
            order,
            rider_id: None,
        }
    }

    pub fn order_status_changed(order: OrderView) -> Self {
        Self {
            kind: EventKind::OrderStatusChanged,
            order,
            rider_id: None,
        }
    }

    pub fn rider_assigned(order: OrderView, rider_id: impl Into<String>) -> Self {
        Self {
            kind: EventKind::RiderAssigned,
            order,
            rider_id: Some(rider_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&EventKind::OrderStatusChanged).unwrap(),
            "\"order-status-changed\""
        );
        let kind: EventKind = serde_json::from_str("\"rider-assigned\"").unwrap();
        assert_eq!(kind, EventKind::RiderAssigned);
    }
}
