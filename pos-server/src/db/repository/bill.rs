//! Bill Repository
//!
//! Bills are append-only: no update path exists. The unique
//! (restaurant, bill_no) index turns duplicate finalizations into
//! `RepoError::Duplicate`.

use super::{BaseRepository, RepoError, RepoResult, map_unique_violation, parse_record_id};
use crate::db::models::Bill;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "bill";

#[derive(Clone)]
pub struct BillRepository {
    base: BaseRepository,
}

impl BillRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Store a finalized bill
    pub async fn create(&self, bill: Bill) -> RepoResult<Bill> {
        let bill_no = bill.bill_no.clone();
        let created: Option<Bill> = self
            .base
            .db()
            .create(TABLE)
            .content(bill)
            .await
            .map_err(|e| {
                map_unique_violation(e, &format!("Bill number '{}' already exists", bill_no))
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create bill".to_string()))
    }

    pub async fn find_by_id(&self, restaurant: &RecordId, id: &str) -> RepoResult<Option<Bill>> {
        let rid = parse_record_id(id, TABLE)?;
        let bill: Option<Bill> = self.base.db().select(rid).await?;
        Ok(bill.filter(|b| &b.restaurant == restaurant))
    }

    /// Bills of a restaurant, newest first
    pub async fn find_all(&self, restaurant: &RecordId) -> RepoResult<Vec<Bill>> {
        let bills: Vec<Bill> = self
            .base
            .db()
            .query("SELECT * FROM bill WHERE restaurant = $restaurant ORDER BY created_at DESC")
            .bind(("restaurant", restaurant.clone()))
            .await?
            .take(0)?;
        Ok(bills)
    }

    /// Bills created in [from, to] (milliseconds since epoch)
    pub async fn find_in_range(
        &self,
        restaurant: &RecordId,
        from: i64,
        to: i64,
    ) -> RepoResult<Vec<Bill>> {
        let bills: Vec<Bill> = self
            .base
            .db()
            .query(
                "SELECT * FROM bill WHERE restaurant = $restaurant \
                 AND created_at >= $from AND created_at <= $to ORDER BY created_at",
            )
            .bind(("restaurant", restaurant.clone()))
            .bind(("from", from))
            .bind(("to", to))
            .await?
            .take(0)?;
        Ok(bills)
    }

    /// Hard delete a bill (admin correction path)
    pub async fn delete(&self, restaurant: &RecordId, id: &str) -> RepoResult<bool> {
        if self.find_by_id(restaurant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Bill {} not found", id)));
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
