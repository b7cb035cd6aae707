//! Event broadcast module
//!
//! One process-wide [`EventBroadcaster`] fans dispatch lifecycle events
//! out to every connected WebSocket client. Delivery is best-effort by
//! design: the REST write path never waits on consumers.

pub mod broadcaster;
pub mod ws;

pub use broadcaster::EventBroadcaster;
