//! Subscription Plan Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Subscription plan entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: f64,
    /// Plan length in days; expiry is computed from this, never stored
    pub duration_days: i64,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create plan payload
#[derive(Debug, Clone, Deserialize)]
pub struct PlanCreate {
    pub name: String,
    pub price: f64,
    pub duration_days: i64,
}
