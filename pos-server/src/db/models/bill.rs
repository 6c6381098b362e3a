//! Bill Model
//!
//! Immutable once created. Line prices are frozen at billing time; the
//! bill number is caller-supplied and unique per restaurant.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One finalized bill line, price frozen at billing time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillLine {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub item: Option<RecordId>,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    /// Line-level discount amount
    #[serde(default)]
    pub discount: f64,
}

/// Bill line as submitted for finalization
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillLineInput {
    /// Menu item id as "menu_item:xxx"; manual lines have none
    pub item: Option<String>,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub discount: Option<f64>,
}

/// Bill entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub dining_table: RecordId,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub space: Option<RecordId>,
    pub bill_no: String,
    pub items: Vec<BillLine>,
    pub subtotal: f64,
    /// Bill-level discount amount
    #[serde(default)]
    pub discount: f64,
    /// Extra charges (service, packing, ...)
    #[serde(default)]
    pub charges: f64,
    pub total: f64,
    #[serde(default)]
    pub persons: i32,
    /// Staff id as "staff:xxx"
    pub created_by: String,
    pub created_at: i64,
}

/// Finalize-bill payload
#[derive(Debug, Clone, Deserialize)]
pub struct BillCreate {
    /// Dining table id as "dining_table:xxx"
    pub dining_table: String,
    pub bill_no: String,
    pub items: Vec<BillLineInput>,
    pub discount: Option<f64>,
    pub charges: Option<f64>,
    pub persons: Option<i32>,
}
