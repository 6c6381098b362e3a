//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active tables of a restaurant
    pub async fn find_all(&self, restaurant: &RecordId) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE restaurant = $restaurant AND is_active = true ORDER BY name",
            )
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find all tables in a space
    pub async fn find_by_space(
        &self,
        restaurant: &RecordId,
        space_id: &str,
    ) -> RepoResult<Vec<DiningTable>> {
        let space = parse_record_id(space_id, "space")?;
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE restaurant = $restaurant AND space = $space \
                 AND is_active = true ORDER BY name",
            )
            .bind(("restaurant", restaurant.clone()))
            .bind(("space", space))
            .await?
            .take(0)?;
        Ok(tables)
    }

    pub async fn find_by_id(
        &self,
        restaurant: &RecordId,
        id: &str,
    ) -> RepoResult<Option<DiningTable>> {
        let rid = parse_record_id(id, TABLE)?;
        let table: Option<DiningTable> = self.base.db().select(rid).await?;
        Ok(table.filter(|t| &t.restaurant == restaurant))
    }

    /// Find table by name in space
    pub async fn find_by_name_in_space(
        &self,
        space: &RecordId,
        name: &str,
    ) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE space = $space AND name = $name LIMIT 1")
            .bind(("space", space.clone()))
            .bind(("name", name.to_string()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    pub async fn create(
        &self,
        restaurant: &RecordId,
        data: DiningTableCreate,
    ) -> RepoResult<DiningTable> {
        let space = parse_record_id(&data.space, "space")?;

        // Check duplicate name in same space
        if self
            .find_by_name_in_space(&space, &data.name)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists in this space",
                data.name
            )));
        }

        let table = DiningTable {
            id: None,
            restaurant: restaurant.clone(),
            name: data.name,
            space,
            capacity: data.capacity.unwrap_or(4),
            is_active: true,
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    pub async fn update(
        &self,
        restaurant: &RecordId,
        id: &str,
        data: DiningTableUpdate,
    ) -> RepoResult<DiningTable> {
        let existing = self
            .find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))?;

        let space = match &data.space {
            Some(s) => parse_record_id(s, "space")?,
            None => existing.space.clone(),
        };
        let name = data.name.unwrap_or(existing.name);

        // Check duplicate name in the (possibly new) space
        if let Some(found) = self.find_by_name_in_space(&space, &name).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists in this space",
                name
            )));
        }

        let thing = parse_record_id(id, TABLE)?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, space = $space, capacity = $capacity, is_active = $is_active",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("space", space))
            .bind(("capacity", data.capacity.unwrap_or(existing.capacity)))
            .bind(("is_active", data.is_active.unwrap_or(existing.is_active)))
            .await?;

        self.find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }

    /// Hard delete a dining table
    pub async fn delete(&self, restaurant: &RecordId, id: &str) -> RepoResult<bool> {
        if self.find_by_id(restaurant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!(
                "Dining table {} not found",
                id
            )));
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
