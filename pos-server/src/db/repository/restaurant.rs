//! Restaurant Repository (tenant records)

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Restaurant, Subscription};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "restaurant";

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

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        let rid = parse_record_id(id, TABLE)?;
        let restaurant: Option<Restaurant> = self.base.db().select(rid).await?;
        Ok(restaurant)
    }

    pub async fn create(&self, restaurant: Restaurant) -> RepoResult<Restaurant> {
        let created: Option<Restaurant> =
            self.base.db().create(TABLE).content(restaurant).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Attach a subscription (plan + start time) to a restaurant
    pub async fn set_subscription(
        &self,
        id: &RecordId,
        subscription: Subscription,
    ) -> RepoResult<Restaurant> {
        self.base
            .db()
            .query("UPDATE $thing SET subscription = $subscription")
            .bind(("thing", id.clone()))
            .bind(("subscription", subscription))
            .await?;

        self.find_by_id(&id.to_string())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))
    }
}
