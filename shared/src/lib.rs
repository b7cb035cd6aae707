//! Shared types for the dispatch platform
//!
//! Types in this crate cross the wire between `dispatch-server` and its
//! clients (restaurant dashboard, rider app, admin console):
//!
//! - [`types`] - roles, order/rider status, the order state machine
//! - [`client`] - request/response DTOs for the HTTP API
//! - [`event`] - broadcast event payloads

pub mod client;
pub mod event;
pub mod types;

pub use client::{
    AccountSummary, AdminSignupRequest, AdminStats, AssignRiderRequest, AuthResponse,
    CreateOrderRequest, LoginRequest, OrderView, RestaurantSignupRequest, RiderProfileView,
    RiderSignupRequest, UpdateStatusRequest,
};
pub use event::{DispatchEvent, EventKind};
pub use types::{OrderStatus, RiderStatus, Role, Timestamp};
