//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables. Every query is
//! scoped by restaurant (tenant) id, so cross-tenant reads are impossible
//! through this layer.

// Tenancy & auth
pub mod plan;
pub mod restaurant;
pub mod staff;

// Layout
pub mod dining_table;
pub mod space;

// Menu
pub mod category;
pub mod menu_item;
pub mod space_price;

// Drafting & billing
pub mod bill;
pub mod table_draft;

// Re-exports
pub use bill::BillRepository;
pub use category::CategoryRepository;
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use plan::PlanRepository;
pub use restaurant::RestaurantRepository;
pub use space::SpaceRepository;
pub use space_price::SpacePriceRepository;
pub use staff::StaffRepository;
pub use table_draft::TableDraftRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a client-supplied id string into a RecordId, rejecting ids that
/// point at a different table
pub fn parse_record_id(id: &str, table: &str) -> RepoResult<RecordId> {
    let rid: RecordId = if id.contains(':') {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?
    } else {
        RecordId::from_table_key(table, id)
    };
    if rid.table() != table {
        return Err(RepoError::Validation(format!(
            "Expected {} ID, got: {}",
            table, id
        )));
    }
    Ok(rid)
}

/// Map a create error to Duplicate when it stems from a unique index
///
/// SurrealDB reports unique index violations as "index ... already contains".
pub fn map_unique_violation(err: surrealdb::Error, what: &str) -> RepoError {
    let msg = err.to_string();
    if msg.contains("already contains") {
        RepoError::Duplicate(what.to_string())
    } else {
        RepoError::Database(msg)
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
