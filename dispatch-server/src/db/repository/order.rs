//! Order Repository (the order ledger)
//!
//! The authoritative record of orders. Append/update-only: orders are
//! created at PREP and progressed, never deleted. Status/assignment
//! mutations happen in the dispatch transactions, not here.

use chrono::Utc;
use shared::client::OrderView;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Order;
use crate::utils::validation::{
    MAX_ITEMS_LEN, MAX_ORDER_ID_LEN, MAX_PREP_TIME, MIN_PREP_TIME,
};

/// Projection used everywhere an order crosses the API boundary:
/// string ids, restaurant and rider names resolved via record links.
const ORDER_VIEW_FIELDS: &str = r#"
    <string>id AS id,
    order_id AS orderId,
    items,
    prep_time AS prepTime,
    status,
    <string>restaurant AS restaurant,
    restaurant.restaurant_name AS restaurantName,
    IF assigned_rider IS NONE THEN NONE ELSE <string>assigned_rider END AS assignedRider,
    assigned_rider.name AS riderName,
    dispatch_time AS dispatchTime,
    created_at AS createdAt,
    updated_at AS updatedAt
"#;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an order by the caller-supplied human-readable identifier
    pub async fn find_by_ref(&self, order_ref: &str) -> RepoResult<Option<Order>> {
        let order_ref_owned = order_ref.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE order_id = $order_ref LIMIT 1")
            .bind(("order_ref", order_ref_owned))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Create a new order at status PREP with no assigned rider
    ///
    /// Fails with [`RepoError::Validation`] for empty fields or a prep
    /// time outside [1, 120], and [`RepoError::Duplicate`] when the
    /// `order_id` already exists system-wide (pre-check plus the unique
    /// index backstop).
    pub async fn create(
        &self,
        restaurant: RecordId,
        order_ref: &str,
        items: &str,
        prep_time: i64,
    ) -> RepoResult<Order> {
        if order_ref.trim().is_empty() {
            return Err(RepoError::Validation("Order ID is required".to_string()));
        }
        if order_ref.len() > MAX_ORDER_ID_LEN {
            return Err(RepoError::Validation("Order ID is too long".to_string()));
        }
        if items.trim().is_empty() {
            return Err(RepoError::Validation("Items are required".to_string()));
        }
        if items.len() > MAX_ITEMS_LEN {
            return Err(RepoError::Validation("Items are too long".to_string()));
        }
        if !(MIN_PREP_TIME..=MAX_PREP_TIME).contains(&prep_time) {
            return Err(RepoError::Validation(format!(
                "Prep time must be between {MIN_PREP_TIME} and {MAX_PREP_TIME} minutes"
            )));
        }

        if self.find_by_ref(order_ref).await?.is_some() {
            return Err(RepoError::Duplicate("Order ID already exists".to_string()));
        }

        let now = Utc::now().timestamp_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE order SET
                    order_id = $order_ref,
                    items = $items,
                    prep_time = $prep_time,
                    status = 'PREP',
                    restaurant = $restaurant,
                    assigned_rider = NONE,
                    dispatch_time = NONE,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("order_ref", order_ref.to_string()))
            .bind(("items", items.to_string()))
            .bind(("prep_time", prep_time))
            .bind(("restaurant", restaurant))
            .bind(("now", now))
            .await?;

        let created: Option<Order> = match result.take(0) {
            Ok(created) => created,
            Err(e) if e.to_string().contains("uniq_order_ref") => {
                return Err(RepoError::Duplicate("Order ID already exists".to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Load an order document by record id
    pub async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id).await?;
        Ok(order)
    }

    /// Resolve a single order into its display view
    pub async fn find_view(&self, id: RecordId) -> RepoResult<Option<OrderView>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_VIEW_FIELDS} FROM order WHERE id = $id"
            ))
            .bind(("id", id))
            .await?;
        let views: Vec<OrderView> = result.take(0)?;
        Ok(views.into_iter().next())
    }

    /// All orders of a restaurant, newest first
    pub async fn list_view_for_restaurant(
        &self,
        restaurant: RecordId,
    ) -> RepoResult<Vec<OrderView>> {
        let views: Vec<OrderView> = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_VIEW_FIELDS} FROM order \
                 WHERE restaurant = $restaurant ORDER BY createdAt DESC"
            ))
            .bind(("restaurant", restaurant))
            .await?
            .take(0)?;
        Ok(views)
    }

    /// Delivered orders of a rider, most recently updated first
    pub async fn list_delivered_for_rider(&self, rider: RecordId) -> RepoResult<Vec<OrderView>> {
        let views: Vec<OrderView> = self
            .base
            .db()
            .query(format!(
                "SELECT {ORDER_VIEW_FIELDS} FROM order \
                 WHERE assigned_rider = $rider AND status = 'DELIVERED' \
                 ORDER BY updatedAt DESC"
            ))
            .bind(("rider", rider))
            .await?
            .take(0)?;
        Ok(views)
    }

    /// Total number of orders
    pub async fn count(&self) -> RepoResult<i64> {
        self.base.count_table("order").await
    }
}
