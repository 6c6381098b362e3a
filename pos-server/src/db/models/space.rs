//! Space Model (seating area)

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Space entity: a seating area that may carry its own item pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub name: String,
    pub description: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create space payload
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update space payload
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
