//! Table Draft Repository
//!
//! The draft record id is derived from the (dining_table, restaurant) pair,
//! so a table can never have more than one draft and every save is an
//! upsert of the whole document. Last writer wins by design.

use super::{BaseRepository, RepoResult, parse_record_id};
use crate::db::models::TableDraft;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "table_draft";

#[derive(Clone)]
pub struct TableDraftRepository {
    base: BaseRepository,
}

impl TableDraftRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Deterministic record key for a (table, restaurant) pair
    fn draft_key(table: &RecordId, restaurant: &RecordId) -> String {
        format!("{}_{}", table.key(), restaurant.key())
    }

    /// Upsert the whole draft document by its deterministic id
    pub async fn save(&self, draft: TableDraft) -> RepoResult<TableDraft> {
        let key = Self::draft_key(&draft.dining_table, &draft.restaurant);
        let saved: Option<TableDraft> = self
            .base
            .db()
            .upsert((TABLE, key.as_str()))
            .content(draft)
            .await?;
        saved.ok_or_else(|| {
            super::RepoError::Database("Failed to save table draft".to_string())
        })
    }

    /// The draft for one table, if any
    pub async fn get(
        &self,
        restaurant: &RecordId,
        table_id: &str,
    ) -> RepoResult<Option<TableDraft>> {
        let table = parse_record_id(table_id, "dining_table")?;
        let key = Self::draft_key(&table, restaurant);
        let draft: Option<TableDraft> = self.base.db().select((TABLE, key.as_str())).await?;
        Ok(draft)
    }

    /// All drafts of a restaurant
    pub async fn find_all(&self, restaurant: &RecordId) -> RepoResult<Vec<TableDraft>> {
        let drafts: Vec<TableDraft> = self
            .base
            .db()
            .query("SELECT * FROM table_draft WHERE restaurant = $restaurant ORDER BY updated_at DESC")
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(drafts)
    }

    /// Remove a table's draft entirely (table vacated)
    pub async fn delete(&self, restaurant: &RecordId, table_id: &str) -> RepoResult<bool> {
        let table = parse_record_id(table_id, "dining_table")?;
        let key = Self::draft_key(&table, restaurant);
        let _: Option<TableDraft> = self.base.db().delete((TABLE, key.as_str())).await?;
        Ok(true)
    }
}
