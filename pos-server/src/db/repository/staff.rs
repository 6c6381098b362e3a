//! Staff Repository

use super::{BaseRepository, RepoError, RepoResult, map_unique_violation, parse_record_id};
use crate::db::models::{Staff, StaffCreate, StaffUpdate};
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "staff";

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all staff of a restaurant
    pub async fn find_all(&self, restaurant: &RecordId) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE restaurant = $restaurant ORDER BY username")
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Find staff by id, scoped to a restaurant
    pub async fn find_by_id(&self, restaurant: &RecordId, id: &str) -> RepoResult<Option<Staff>> {
        let rid = parse_record_id(id, TABLE)?;
        let staff: Option<Staff> = self.base.db().select(rid).await?;
        Ok(staff.filter(|s| &s.restaurant == restaurant))
    }

    /// Find staff by username within a restaurant
    pub async fn find_by_username(
        &self,
        restaurant: &RecordId,
        username: &str,
    ) -> RepoResult<Option<Staff>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM staff WHERE restaurant = $restaurant AND username = $username LIMIT 1",
            )
            .bind(("restaurant", restaurant.clone()))
            .bind(("username", username.to_string()))
            .await?;
        let staff: Vec<Staff> = result.take(0)?;
        Ok(staff.into_iter().next())
    }

    /// Create a staff member; the password is hashed here
    pub async fn create(&self, restaurant: &RecordId, data: StaffCreate) -> RepoResult<Staff> {
        if data.username.trim().is_empty() || data.password.is_empty() {
            return Err(RepoError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let hash_pass = Staff::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {}", e)))?;

        let staff = Staff {
            id: None,
            restaurant: restaurant.clone(),
            display_name: data.display_name.unwrap_or_else(|| data.username.clone()),
            username: data.username,
            hash_pass,
            role: data.role,
            is_active: true,
            created_at: now_millis(),
        };

        let created: Option<Staff> = self
            .base
            .db()
            .create(TABLE)
            .content(staff)
            .await
            .map_err(|e| map_unique_violation(e, "Username already taken"))?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff".to_string()))
    }

    /// Update a staff member
    pub async fn update(
        &self,
        restaurant: &RecordId,
        id: &str,
        data: StaffUpdate,
    ) -> RepoResult<Staff> {
        let existing = self
            .find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", id)))?;

        let hash_pass = match &data.password {
            Some(p) => Staff::hash_password(p)
                .map_err(|e| RepoError::Database(format!("Password hashing failed: {}", e)))?,
            None => existing.hash_pass.clone(),
        };

        let thing = parse_record_id(id, TABLE)?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET display_name = $display_name, hash_pass = $hash_pass, \
                 role = $role, is_active = $is_active",
            )
            .bind(("thing", thing))
            .bind((
                "display_name",
                data.display_name.unwrap_or(existing.display_name),
            ))
            .bind(("hash_pass", hash_pass))
            .bind(("role", data.role.unwrap_or(existing.role)))
            .bind(("is_active", data.is_active.unwrap_or(existing.is_active)))
            .await?;

        self.find_by_id(restaurant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", id)))
    }

    /// Hard delete a staff member
    pub async fn delete(&self, restaurant: &RecordId, id: &str) -> RepoResult<bool> {
        // Scope check before deleting
        if self.find_by_id(restaurant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Staff {} not found", id)));
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
