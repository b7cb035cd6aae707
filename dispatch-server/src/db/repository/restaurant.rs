//! Restaurant Repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Restaurant;

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a restaurant owned by `manager` (called at manager signup)
    pub async fn create(
        &self,
        restaurant_name: &str,
        signature_dish: &str,
        manager: RecordId,
    ) -> RepoResult<Restaurant> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE restaurant SET
                    restaurant_name = $restaurant_name,
                    signature_dish = $signature_dish,
                    manager = $manager,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("restaurant_name", restaurant_name.to_string()))
            .bind(("signature_dish", signature_dish.to_string()))
            .bind(("manager", manager))
            .bind(("created_at", Utc::now().timestamp_millis()))
            .await?;

        let created: Option<Restaurant> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Find the restaurant owned by a manager account
    pub async fn find_by_manager(&self, manager: RecordId) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE manager = $manager LIMIT 1")
            .bind(("manager", manager))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Total number of restaurants
    pub async fn count(&self) -> RepoResult<i64> {
        self.base.count_table("restaurant").await
    }
}
