//! Space Price Model
//!
//! Per-space price override for a menu item. Unique per (menu_item, space)
//! pair, enforced by the `uniq_space_price` index.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Space-specific price override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacePrice {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub space: RecordId,
    pub price: f64,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Set (create or replace) a space price override
#[derive(Debug, Clone, Deserialize)]
pub struct SpacePriceSet {
    /// Space id as "space:xxx"
    pub space: String,
    pub price: f64,
}
