//! Menu Category Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active categories of a restaurant
    pub async fn find_all(&self, restaurant: &RecordId) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query(
                "SELECT * FROM category WHERE restaurant = $restaurant AND is_active = true ORDER BY sort_order",
            )
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(
        &self,
        restaurant: &RecordId,
        id: &str,
    ) -> RepoResult<Option<Category>> {
        let rid = parse_record_id(id, TABLE)?;
        let category: Option<Category> = self.base.db().select(rid).await?;
        Ok(category.filter(|c| &c.restaurant == restaurant))
    }

    pub async fn create(&self, restaurant: &RecordId, data: CategoryCreate) -> RepoResult<Category> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation(
                "Category name is required".to_string(),
            ));
        }

        let category = Category {
            id: None,
            restaurant: restaurant.clone(),
            name: data.name,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    pub async fn update(
        &self,
        restaurant: &RecordId,
        id: &str,
        data: CategoryUpdate,
    ) -> RepoResult<Category> {
        let existing = self
            .find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        let thing = parse_record_id(id, TABLE)?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, sort_order = $sort_order, is_active = $is_active",
            )
            .bind(("thing", thing))
            .bind(("name", data.name.unwrap_or(existing.name)))
            .bind(("sort_order", data.sort_order.unwrap_or(existing.sort_order)))
            .bind(("is_active", data.is_active.unwrap_or(existing.is_active)))
            .await?;

        self.find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category
    pub async fn delete(&self, restaurant: &RecordId, id: &str) -> RepoResult<bool> {
        if self.find_by_id(restaurant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Category {} not found", id)));
        }
        let thing = parse_record_id(id, TABLE)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
