//! Common types for the shared crate
//!
//! Roles, status enums and the order state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Account role
///
/// Exactly one role per account, immutable after signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Rider,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Rider => "rider",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "rider" => Ok(Role::Rider),
            other => Err(ParseEnumError::new("Role", other)),
        }
    }
}

/// Order lifecycle status
///
/// A single linear chain with no branching and no cycles:
///
/// ```text
/// PREP --> PICKED --> ON_ROUTE --> DELIVERED (terminal)
/// ```
///
/// Transitions are strictly forward, one step at a time. The chain is
/// encoded as an enum with a total [`successor`](OrderStatus::successor)
/// function so that an unknown current status cannot silently compare
/// against `undefined` the way a lookup table can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PREP")]
    Prep,
    #[serde(rename = "PICKED")]
    Picked,
    #[serde(rename = "ON_ROUTE")]
    OnRoute,
    #[serde(rename = "DELIVERED")]
    Delivered,
}

impl OrderStatus {
    /// The only legal next status, `None` for the terminal state.
    pub fn successor(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Prep => Some(OrderStatus::Picked),
            OrderStatus::Picked => Some(OrderStatus::OnRoute),
            OrderStatus::OnRoute => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// The only status this one may be advanced from, `None` for the
    /// initial state. Used as the compare-and-swap guard when advancing.
    pub fn predecessor(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Prep => None,
            OrderStatus::Picked => Some(OrderStatus::Prep),
            OrderStatus::OnRoute => Some(OrderStatus::Picked),
            OrderStatus::Delivered => Some(OrderStatus::OnRoute),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Prep => "PREP",
            OrderStatus::Picked => "PICKED",
            OrderStatus::OnRoute => "ON_ROUTE",
            OrderStatus::Delivered => "DELIVERED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PREP" => Ok(OrderStatus::Prep),
            "PICKED" => Ok(OrderStatus::Picked),
            "ON_ROUTE" => Ok(OrderStatus::OnRoute),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            other => Err(ParseEnumError::new("OrderStatus", other)),
        }
    }
}

/// Rider availability status
///
/// Invariant (enforced by the server): `Busy` if and only if the rider
/// profile holds a current order reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiderStatus {
    Available,
    Busy,
}

impl RiderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiderStatus::Available => "available",
            RiderStatus::Busy => "busy",
        }
    }
}

impl fmt::Display for RiderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for string → enum conversions
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_chain_is_linear() {
        assert_eq!(OrderStatus::Prep.successor(), Some(OrderStatus::Picked));
        assert_eq!(OrderStatus::Picked.successor(), Some(OrderStatus::OnRoute));
        assert_eq!(
            OrderStatus::OnRoute.successor(),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(OrderStatus::Delivered.successor(), None);
    }

    #[test]
    fn predecessor_mirrors_successor() {
        for status in [
            OrderStatus::Prep,
            OrderStatus::Picked,
            OrderStatus::OnRoute,
            OrderStatus::Delivered,
        ] {
            if let Some(next) = status.successor() {
                assert_eq!(next.predecessor(), Some(status));
            }
        }
        assert_eq!(OrderStatus::Prep.predecessor(), None);
    }

    #[test]
    fn status_wire_format_roundtrip() {
        let on_route: OrderStatus = serde_json::from_str("\"ON_ROUTE\"").unwrap();
        assert_eq!(on_route, OrderStatus::OnRoute);
        assert_eq!(serde_json::to_string(&on_route).unwrap(), "\"ON_ROUTE\"");
        assert_eq!("DELIVERED".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert!("DONE".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        assert_eq!("rider".parse::<Role>().unwrap(), Role::Rider);
    }
}
