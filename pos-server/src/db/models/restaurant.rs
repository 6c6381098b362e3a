//! Restaurant Model (tenant)

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Active subscription attached to a restaurant
///
/// Expiry is never stored; it is computed at request time as
/// `started_at + plan.duration_days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(with = "serde_helpers::record_id")]
    pub plan: RecordId,
    /// Subscription start (milliseconds since epoch)
    pub started_at: i64,
}

/// Restaurant entity, one per tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub owner_name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}
