//! Bill API Handlers
//!
//! Finalization never trusts client prices for catalogued items: each line
//! is re-resolved against the table's space before the bill is frozen. The
//! draft is cleared in a separate write after the bill lands; a failure to
//! clear leaves the bill valid and is only logged.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::billing;
use crate::core::ServerState;
use crate::db::models::{Bill, BillCreate, BillLine};
use crate::db::repository::{
    BillRepository, DiningTableRepository, MenuItemRepository, TableDraftRepository,
};
use crate::pricing::PriceResolver;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// POST /api/bills - finalize a table's bill
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<BillCreate>,
) -> AppResult<Json<Bill>> {
    if payload.bill_no.trim().is_empty() {
        return Err(AppError::validation("Bill number is required"));
    }
    if payload.items.is_empty() {
        return Err(AppError::validation("A bill needs at least one line"));
    }

    let tables = DiningTableRepository::new(state.get_db());
    let table = tables
        .find_by_id(&user.restaurant, &payload.dining_table)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Table {} not found", payload.dining_table))
        })?;
    let table_rid = table
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Table without id"))?;

    let items_repo = MenuItemRepository::new(state.get_db());
    let resolver = PriceResolver::new(state.get_db());

    let mut lines: Vec<BillLine> = Vec::with_capacity(payload.items.len());
    for input in payload.items {
        let resolved = match &input.item {
            Some(item_id) => match items_repo.find_by_id(&user.restaurant, item_id).await? {
                Some(item) => Some(resolver.price_for(&item, Some(&table.space)).await?),
                None => {
                    tracing::warn!(item = %item_id, "Billed item no longer exists, keeping submitted price");
                    None
                }
            },
            None => None,
        };
        lines.push(billing::freeze_line(input, resolved)?);
    }

    let discount = payload.discount.unwrap_or(0.0);
    let charges = payload.charges.unwrap_or(0.0);
    let (subtotal, total) = billing::compute_bill_totals(&lines, discount, charges)?;

    let bills = BillRepository::new(state.get_db());
    let bill = bills
        .create(Bill {
            id: None,
            restaurant: user.restaurant.clone(),
            dining_table: table_rid,
            space: Some(table.space.clone()),
            bill_no: payload.bill_no,
            items: lines,
            subtotal,
            discount,
            charges,
            total,
            persons: payload.persons.unwrap_or(0),
            created_by: user.id.clone(),
            created_at: now_millis(),
        })
        .await?;

    // Turn the table over. Separate write; the bill stands even if this fails.
    let drafts = TableDraftRepository::new(state.get_db());
    if let Err(e) = drafts.delete(&user.restaurant, &payload.dining_table).await {
        tracing::warn!(
            table = %payload.dining_table,
            error = %e,
            "Failed to clear draft after billing"
        );
    }

    tracing::info!(
        bill_no = %bill.bill_no,
        total = bill.total,
        restaurant = %user.restaurant,
        "Bill finalized"
    );

    Ok(Json(bill))
}

/// GET /api/bills - all bills, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Bill>>> {
    let repo = BillRepository::new(state.get_db());
    let bills = repo.find_all(&user.restaurant).await?;
    Ok(Json(bills))
}

/// GET /api/bills/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Bill>> {
    let repo = BillRepository::new(state.get_db());
    let bill = repo
        .find_by_id(&user.restaurant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bill {} not found", id)))?;
    Ok(Json(bill))
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Millis since epoch, inclusive
    pub from: Option<i64>,
    /// Millis since epoch, exclusive
    pub to: Option<i64>,
}

impl RangeQuery {
    fn bounds(&self) -> AppResult<(i64, i64)> {
        let from = self.from.unwrap_or(0);
        let to = self.to.unwrap_or_else(now_millis);
        if from > to {
            return Err(AppError::validation("'from' must not be after 'to'"));
        }
        Ok((from, to))
    }
}

/// GET /api/bills/stats?from=&to= - headline figures for a date range
pub async fn stats(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(range): Query<RangeQuery>,
) -> AppResult<Json<billing::BillStats>> {
    let (from, to) = range.bounds()?;
    let repo = BillRepository::new(state.get_db());
    let bills = repo.find_in_range(&user.restaurant, from, to).await?;
    Ok(Json(billing::bill_stats(&bills)))
}

/// GET /api/bills/stats/net-profit?from=&to=
///
/// Item costs are resolved at query time; deleted items and manual lines
/// count zero cost.
pub async fn net_profit_stats(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(range): Query<RangeQuery>,
) -> AppResult<Json<billing::NetProfitStats>> {
    let (from, to) = range.bounds()?;

    let repo = BillRepository::new(state.get_db());
    let bills = repo.find_in_range(&user.restaurant, from, to).await?;

    let items_repo = MenuItemRepository::new(state.get_db());
    let mut costs: HashMap<String, f64> = HashMap::new();
    for bill in &bills {
        for line in &bill.items {
            let Some(item) = &line.item else { continue };
            let key = item.to_string();
            if costs.contains_key(&key) {
                continue;
            }
            match items_repo.find_by_id(&user.restaurant, &key).await {
                Ok(Some(menu_item)) => {
                    costs.insert(key, menu_item.cost.unwrap_or(0.0));
                }
                Ok(None) => {
                    costs.insert(key, 0.0);
                }
                Err(e) => {
                    tracing::warn!(item = %key, error = %e, "Cost lookup failed, counting zero");
                    costs.insert(key, 0.0);
                }
            }
        }
    }

    Ok(Json(billing::net_profit(&bills, &costs)))
}

/// DELETE /api/bills/:id - admin only
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = BillRepository::new(state.get_db());
    let result = repo.delete(&user.restaurant, &id).await?;

    crate::security_log!(
        "WARN",
        "bill_deleted",
        user_id = user.id.clone(),
        username = user.username.clone(),
        bill = id.clone()
    );
    Ok(Json(result))
}
