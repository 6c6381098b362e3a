//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active menu items of a restaurant
    pub async fn find_all(&self, restaurant: &RecordId) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM menu_item WHERE restaurant = $restaurant AND is_active = true ORDER BY sort_order",
            )
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find all active items in a category
    pub async fn find_by_category(
        &self,
        restaurant: &RecordId,
        category_id: &str,
    ) -> RepoResult<Vec<MenuItem>> {
        let category = parse_record_id(category_id, "category")?;
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM menu_item WHERE restaurant = $restaurant AND category = $category \
                 AND is_active = true ORDER BY sort_order",
            )
            .bind(("restaurant", restaurant.clone()))
            .bind(("category", category))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(
        &self,
        restaurant: &RecordId,
        id: &str,
    ) -> RepoResult<Option<MenuItem>> {
        let rid = parse_record_id(id, TABLE)?;
        let item: Option<MenuItem> = self.base.db().select(rid).await?;
        Ok(item.filter(|i| &i.restaurant == restaurant))
    }

    pub async fn create(&self, restaurant: &RecordId, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation(
                "Menu item name is required".to_string(),
            ));
        }
        let category = parse_record_id(&data.category, "category")?;

        let item = MenuItem {
            id: None,
            restaurant: restaurant.clone(),
            category,
            name: data.name,
            base_price: data.base_price,
            price: data.price,
            cost: data.cost,
            is_spicy_available: data.is_spicy_available.unwrap_or(false),
            is_jain_available: data.is_jain_available.unwrap_or(false),
            image: data.image,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    pub async fn update(
        &self,
        restaurant: &RecordId,
        id: &str,
        data: MenuItemUpdate,
    ) -> RepoResult<MenuItem> {
        let existing = self
            .find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        let category = match &data.category {
            Some(c) => parse_record_id(c, "category")?,
            None => existing.category.clone(),
        };

        let thing = parse_record_id(id, TABLE)?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET category = $category, name = $name, base_price = $base_price, \
                 price = $price, cost = $cost, is_spicy_available = $is_spicy_available, \
                 is_jain_available = $is_jain_available, image = $image, \
                 sort_order = $sort_order, is_active = $is_active",
            )
            .bind(("thing", thing))
            .bind(("category", category))
            .bind(("name", data.name.unwrap_or(existing.name)))
            .bind(("base_price", data.base_price.or(existing.base_price)))
            .bind(("price", data.price.or(existing.price)))
            .bind(("cost", data.cost.or(existing.cost)))
            .bind((
                "is_spicy_available",
                data.is_spicy_available.unwrap_or(existing.is_spicy_available),
            ))
            .bind((
                "is_jain_available",
                data.is_jain_available.unwrap_or(existing.is_jain_available),
            ))
            .bind(("image", data.image.or(existing.image)))
            .bind(("sort_order", data.sort_order.unwrap_or(existing.sort_order)))
            .bind(("is_active", data.is_active.unwrap_or(existing.is_active)))
            .await?;

        self.find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item and its space price overrides
    pub async fn delete(&self, restaurant: &RecordId, id: &str) -> RepoResult<bool> {
        if self.find_by_id(restaurant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }
        let thing = parse_record_id(id, TABLE)?;
        self.base
            .db()
            .query("DELETE space_price WHERE menu_item = $thing; DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
