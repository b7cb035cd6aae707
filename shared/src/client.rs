//! Client-related types shared between server and client
//!
//! Request/response types used in API communication. Wire field names are
//! camelCase to match the dashboard and rider clients.

use serde::{Deserialize, Serialize};

use crate::types::{OrderStatus, RiderStatus, Role, Timestamp};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Restaurant (manager) signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSignupRequest {
    pub restaurant_name: String,
    pub signature_dish: String,
    pub email: String,
    pub password: String,
}

/// Rider signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiderSignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Admin signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account summary returned with tokens (never contains the credential)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Signup/login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: AccountSummary,
}

// =============================================================================
// Order API DTOs
// =============================================================================

/// Create order request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_id: String,
    pub items: String,
    pub prep_time: i64,
}

/// Assign rider request (`riderId` is the rider *profile* id)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRiderRequest {
    pub rider_id: String,
}

/// Status advancement request
///
/// The caller names the exact next state; "forward" is never implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Order with restaurant and rider names resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub order_id: String,
    pub items: String,
    pub prep_time: i64,
    pub status: OrderStatus,
    pub restaurant: String,
    pub restaurant_name: String,
    #[serde(default)]
    pub assigned_rider: Option<String>,
    #[serde(default)]
    pub rider_name: Option<String>,
    #[serde(default)]
    pub dispatch_time: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// =============================================================================
// Rider API DTOs
// =============================================================================

/// Rider profile as shown to managers picking an assignee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderProfileView {
    pub id: String,
    pub name: String,
    pub status: RiderStatus,
    #[serde(default)]
    pub current_order: Option<String>,
}

// =============================================================================
// Admin API DTOs
// =============================================================================

/// Aggregate platform counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_restaurants: i64,
    pub total_riders: i64,
    pub active_riders: i64,
    pub total_orders: i64,
}
