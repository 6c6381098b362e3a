//! Menu Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu item entity
///
/// `base_price` is the default price absent any space override. `price` is
/// the legacy flat price field kept for data imported from older
/// installations; the resolver falls back to it when `base_price` is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub category: RecordId,
    pub name: String,
    pub base_price: Option<f64>,
    /// Legacy flat price
    pub price: Option<f64>,
    /// Unit cost, used by net-profit reporting (looked up at query time)
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_spicy_available: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_jain_available: bool,
    pub image: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemCreate {
    /// Category id as "category:xxx"
    pub category: String,
    pub name: String,
    pub base_price: Option<f64>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub is_spicy_available: Option<bool>,
    pub is_jain_available: Option<bool>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemUpdate {
    pub category: Option<String>,
    pub name: Option<String>,
    pub base_price: Option<f64>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub is_spicy_available: Option<bool>,
    pub is_jain_available: Option<bool>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
