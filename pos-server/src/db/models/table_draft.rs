//! Table Draft Model
//!
//! The in-progress, mutable cart for an occupied table. One draft exists per
//! (dining_table, restaurant); saves replace the whole document
//! (last-writer-wins), and the KOT history is append-only.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Draft lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    #[default]
    Draft,
    Occupied,
    Completed,
}

/// Who touched a cart line, and when
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditStamp {
    /// Staff id as "staff:xxx"
    pub staff: String,
    pub name: String,
    /// Milliseconds since epoch
    pub at: i64,
}

/// One line of the cart
///
/// Name and price are snapshots taken when the line was added, decoupled
/// from the live menu item so finished bills keep their history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Menu item reference; manual "extra" lines have none
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub item: Option<RecordId>,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub note: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_spicy: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_jain: bool,
    pub added_by: AuditStamp,
    pub last_updated_by: AuditStamp,
}

/// Cart line as submitted by a client (no audit stamps)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CartLineInput {
    /// Menu item id as "menu_item:xxx"; omitted for manual lines
    pub item: Option<String>,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub note: Option<String>,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default)]
    pub is_jain: bool,
}

/// One line of a KOT snapshot, a quantity delta
///
/// Positive quantity = added since the last KOT, negative = removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KotLine {
    pub item: Option<String>,
    pub name: String,
    pub quantity: i32,
    pub note: Option<String>,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default)]
    pub is_jain: bool,
}

/// A snapshot of cart deltas sent to the kitchen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KotSnapshot {
    pub id: String,
    pub items: Vec<KotLine>,
    /// Milliseconds since epoch
    pub created_at: i64,
    #[serde(default)]
    pub printed: bool,
}

/// Table draft entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDraft {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub dining_table: RecordId,
    #[serde(default)]
    pub persons: i32,
    #[serde(default)]
    pub cart: Vec<CartLine>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub status: DraftStatus,
    #[serde(default)]
    pub kot_history: Vec<KotSnapshot>,
    /// KOT ids already sent to the printer
    #[serde(default)]
    pub printed_kots: Vec<String>,
    #[serde(default)]
    pub updated_at: i64,
}

/// Save-draft payload: the whole cart, replaced wholesale
#[derive(Debug, Clone, Deserialize)]
pub struct DraftSave {
    pub persons: Option<i32>,
    pub cart: Vec<CartLineInput>,
}
