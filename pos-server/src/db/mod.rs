//! Database Module
//!
//! Embedded SurrealDB storage. The schema is mostly schemaless; uniqueness
//! constraints that the application relies on are defined here at startup.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "pos";
const DATABASE: &str = "pos";

/// Database service that owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!(path = %db_path, "Database connection established (SurrealDB embedded)");

        Ok(Self { db })
    }
}

/// Define the indexes the application depends on
///
/// - bill numbers are unique per restaurant (duplicate finalization → 409)
/// - one space price override per (menu_item, space) pair
/// - staff usernames are unique per restaurant
/// - one draft per (dining_table, restaurant)
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "
        DEFINE INDEX IF NOT EXISTS uniq_bill_no ON TABLE bill FIELDS restaurant, bill_no UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_space_price ON TABLE space_price FIELDS menu_item, space UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_staff_username ON TABLE staff FIELDS restaurant, username UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_draft_table ON TABLE table_draft FIELDS dining_table, restaurant UNIQUE;
        ",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
