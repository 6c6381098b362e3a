//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub name: String,
    /// Space reference
    #[serde(with = "serde_helpers::record_id")]
    pub space: RecordId,
    #[serde(default)]
    pub capacity: i32,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create dining table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    /// Space id as "space:xxx"
    pub space: String,
    pub capacity: Option<i32>,
}

/// Update dining table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableUpdate {
    pub name: Option<String>,
    pub space: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}
