//! Database models
//!
//! Document shapes persisted in SurrealDB. Record links between documents
//! use [`surrealdb::RecordId`]; on the API boundary ids serialize as
//! `table:key` strings (see [`serde_helpers`]).

pub mod account;
pub mod order;
pub mod restaurant;
pub mod rider;
pub mod serde_helpers;

pub use account::{Account, AccountId};
pub use order::{Order, OrderId};
pub use restaurant::{Restaurant, RestaurantId};
pub use rider::{RiderId, RiderProfile};
