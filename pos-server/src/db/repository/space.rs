//! Space Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Space, SpaceCreate, SpaceUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "space";

#[derive(Clone)]
pub struct SpaceRepository {
    base: BaseRepository,
}

impl SpaceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active spaces of a restaurant
    pub async fn find_all(&self, restaurant: &RecordId) -> RepoResult<Vec<Space>> {
        let spaces: Vec<Space> = self
            .base
            .db()
            .query(
                "SELECT * FROM space WHERE restaurant = $restaurant AND is_active = true ORDER BY name",
            )
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(spaces)
    }

    pub async fn find_by_id(&self, restaurant: &RecordId, id: &str) -> RepoResult<Option<Space>> {
        let rid = parse_record_id(id, TABLE)?;
        let space: Option<Space> = self.base.db().select(rid).await?;
        Ok(space.filter(|s| &s.restaurant == restaurant))
    }

    pub async fn create(&self, restaurant: &RecordId, data: SpaceCreate) -> RepoResult<Space> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("Space name is required".to_string()));
        }

        let space = Space {
            id: None,
            restaurant: restaurant.clone(),
            name: data.name,
            description: data.description,
            is_active: true,
        };

        let created: Option<Space> = self.base.db().create(TABLE).content(space).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create space".to_string()))
    }

    pub async fn update(
        &self,
        restaurant: &RecordId,
        id: &str,
        data: SpaceUpdate,
    ) -> RepoResult<Space> {
        let existing = self
            .find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Space {} not found", id)))?;

        let thing = parse_record_id(id, TABLE)?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, description = $description, is_active = $is_active",
            )
            .bind(("thing", thing))
            .bind(("name", data.name.unwrap_or(existing.name)))
            .bind(("description", data.description.or(existing.description)))
            .bind(("is_active", data.is_active.unwrap_or(existing.is_active)))
            .await?;

        self.find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Space {} not found", id)))
    }

    /// Delete a space; refused while it still has active tables
    pub async fn delete(&self, restaurant: &RecordId, id: &str) -> RepoResult<bool> {
        let space = self
            .find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Space {} not found", id)))?;

        let space_id = space.id.clone().unwrap_or(parse_record_id(id, TABLE)?);
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS c FROM dining_table WHERE space = $space AND is_active = true GROUP ALL")
            .bind(("space", space_id.clone()))
            .await?;
        let counts: Vec<serde_json::Value> = result.take(0)?;
        let table_count = counts
            .first()
            .and_then(|v| v.get("c"))
            .and_then(|c| c.as_i64())
            .unwrap_or(0);
        if table_count > 0 {
            return Err(RepoError::Validation(
                "Cannot delete space with active tables".to_string(),
            ));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", space_id))
            .await?;
        Ok(true)
    }
}
