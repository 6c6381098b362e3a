//! Table Draft API Handlers
//!
//! The draft endpoints are the write-heavy path of the system: every
//! terminal at a table saves through here. Saves replace the whole cart
//! (last-writer-wins) and all totals are recomputed server-side.

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{AuditStamp, DraftSave, KotSnapshot, TableDraft};
use crate::db::repository::{DiningTableRepository, TableDraftRepository};
use crate::drafts;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

fn stamp(user: &CurrentUser, at: i64) -> AuditStamp {
    AuditStamp {
        staff: user.id.clone(),
        name: user.username.clone(),
        at,
    }
}

/// The table must exist and belong to the caller's restaurant
async fn require_table(
    state: &ServerState,
    user: &CurrentUser,
    table_id: &str,
) -> AppResult<crate::db::models::DiningTable> {
    let repo = DiningTableRepository::new(state.get_db());
    repo.find_by_id(&user.restaurant, table_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_id)))
}

/// GET /api/drafts - all drafts of the restaurant, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<TableDraft>>> {
    let repo = TableDraftRepository::new(state.get_db());
    let drafts = repo.find_all(&user.restaurant).await?;
    Ok(Json(drafts))
}

/// GET /api/drafts/:table_id - the draft for one table (empty draft if none)
pub async fn get_by_table(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(table_id): Path<String>,
) -> AppResult<Json<TableDraft>> {
    let table = require_table(&state, &user, &table_id).await?;
    let table_rid = table
        .id
        .ok_or_else(|| AppError::internal("Table without id"))?;

    let repo = TableDraftRepository::new(state.get_db());
    let draft = repo
        .get(&user.restaurant, &table_id)
        .await?
        .unwrap_or_else(|| {
            drafts::cleared_draft(user.restaurant.clone(), table_rid, now_millis())
        });
    Ok(Json(draft))
}

/// PUT /api/drafts/:table_id - replace the table's cart wholesale
pub async fn save(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(table_id): Path<String>,
    Json(payload): Json<DraftSave>,
) -> AppResult<Json<TableDraft>> {
    let table = require_table(&state, &user, &table_id).await?;
    let table_rid = table
        .id
        .ok_or_else(|| AppError::internal("Table without id"))?;

    let repo = TableDraftRepository::new(state.get_db());
    let existing = repo.get(&user.restaurant, &table_id).await?;

    let now = now_millis();
    let draft = drafts::apply_save(
        existing,
        user.restaurant.clone(),
        table_rid,
        payload,
        stamp(&user, now),
        now,
    )?;

    let saved = repo.save(draft).await?;
    Ok(Json(saved))
}

/// POST /api/drafts/:table_id/kot - record a KOT snapshot of cart deltas
pub async fn send_kot(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(table_id): Path<String>,
) -> AppResult<Json<KotSnapshot>> {
    require_table(&state, &user, &table_id).await?;

    let repo = TableDraftRepository::new(state.get_db());
    let mut draft = repo
        .get(&user.restaurant, &table_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No draft for table {}", table_id)))?;

    let snapshot = drafts::send_to_kitchen(&mut draft, now_millis())
        .ok_or_else(|| AppError::business_rule("No cart changes since the last kitchen order"))?;

    repo.save(draft).await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct MarkPrintedRequest {
    pub kot_ids: Vec<String>,
}

/// POST /api/drafts/:table_id/kot/printed - idempotent printed flagging
pub async fn mark_kot_printed(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(table_id): Path<String>,
    Json(payload): Json<MarkPrintedRequest>,
) -> AppResult<Json<TableDraft>> {
    require_table(&state, &user, &table_id).await?;

    let repo = TableDraftRepository::new(state.get_db());
    let mut draft = repo
        .get(&user.restaurant, &table_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No draft for table {}", table_id)))?;

    let newly_marked = drafts::mark_printed(&mut draft, &payload.kot_ids);
    if newly_marked > 0 {
        draft.updated_at = now_millis();
    }

    let saved = repo.save(draft).await?;
    Ok(Json(saved))
}

/// POST /api/drafts/:table_id/clear - table turnover, fresh empty draft
pub async fn clear(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(table_id): Path<String>,
) -> AppResult<Json<TableDraft>> {
    let table = require_table(&state, &user, &table_id).await?;
    let table_rid = table
        .id
        .ok_or_else(|| AppError::internal("Table without id"))?;

    let repo = TableDraftRepository::new(state.get_db());
    let cleared = drafts::cleared_draft(user.restaurant.clone(), table_rid, now_millis());
    let saved = repo.save(cleared).await?;
    Ok(Json(saved))
}

/// DELETE /api/drafts/:table_id - drop the draft record entirely
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(table_id): Path<String>,
) -> AppResult<Json<bool>> {
    require_table(&state, &user, &table_id).await?;

    let repo = TableDraftRepository::new(state.get_db());
    let result = repo.delete(&user.restaurant, &table_id).await?;
    Ok(Json(result))
}
