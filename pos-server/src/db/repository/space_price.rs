//! Space Price Repository
//!
//! Per-space overrides for menu item prices. The (menu_item, space) pair is
//! unique; `set` replaces an existing override instead of stacking a second
//! row for the pair.

use super::{BaseRepository, RepoError, RepoResult, map_unique_violation, parse_record_id};
use crate::db::models::{SpacePrice, SpacePriceSet};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "space_price";

#[derive(Clone)]
pub struct SpacePriceRepository {
    base: BaseRepository,
}

impl SpacePriceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All overrides for one menu item
    pub async fn find_by_item(
        &self,
        restaurant: &RecordId,
        item_id: &str,
    ) -> RepoResult<Vec<SpacePrice>> {
        let item = parse_record_id(item_id, "menu_item")?;
        let prices: Vec<SpacePrice> = self
            .base
            .db()
            .query(
                "SELECT * FROM space_price WHERE restaurant = $restaurant AND menu_item = $item \
                 AND is_active = true",
            )
            .bind(("restaurant", restaurant.clone()))
            .bind(("item", item))
            .await?
            .take(0)?;
        Ok(prices)
    }

    /// The active override for one (item, space) pair, if any
    pub async fn find_for(
        &self,
        item: &RecordId,
        space: &RecordId,
    ) -> RepoResult<Option<SpacePrice>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM space_price WHERE menu_item = $item AND space = $space \
                 AND is_active = true LIMIT 1",
            )
            .bind(("item", item.clone()))
            .bind(("space", space.clone()))
            .await?;
        let prices: Vec<SpacePrice> = result.take(0)?;
        Ok(prices.into_iter().next())
    }

    /// Create or replace the override for (item, space)
    pub async fn set(
        &self,
        restaurant: &RecordId,
        item_id: &str,
        data: SpacePriceSet,
    ) -> RepoResult<SpacePrice> {
        let item = parse_record_id(item_id, "menu_item")?;
        let space = parse_record_id(&data.space, "space")?;

        if let Some(existing) = self.find_for(&item, &space).await? {
            let thing = existing
                .id
                .clone()
                .ok_or_else(|| RepoError::Database("Space price without id".to_string()))?;
            self.base
                .db()
                .query("UPDATE $thing SET price = $price")
                .bind(("thing", thing.clone()))
                .bind(("price", data.price))
                .await?;
            return Ok(SpacePrice {
                price: data.price,
                ..existing
            });
        }

        let price = SpacePrice {
            id: None,
            restaurant: restaurant.clone(),
            menu_item: item,
            space,
            price: data.price,
            is_active: true,
        };

        let created: Option<SpacePrice> = self
            .base
            .db()
            .create(TABLE)
            .content(price)
            .await
            .map_err(|e| map_unique_violation(e, "Price override already exists for this space"))?;
        created.ok_or_else(|| RepoError::Database("Failed to create space price".to_string()))
    }

    /// Remove the override for (item, space)
    pub async fn delete(
        &self,
        restaurant: &RecordId,
        item_id: &str,
        space_id: &str,
    ) -> RepoResult<bool> {
        let item = parse_record_id(item_id, "menu_item")?;
        let space = parse_record_id(space_id, "space")?;
        self.base
            .db()
            .query(
                "DELETE space_price WHERE restaurant = $restaurant AND menu_item = $item AND space = $space",
            )
            .bind(("restaurant", restaurant.clone()))
            .bind(("item", item))
            .bind(("space", space))
            .await?;
        Ok(true)
    }
}
