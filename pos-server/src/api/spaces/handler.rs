//! Space API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{DiningTable, Space, SpaceCreate, SpaceUpdate};
use crate::db::repository::{DiningTableRepository, SpaceRepository};
use crate::utils::{AppError, AppResult};

/// GET /api/spaces - all spaces of the restaurant
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Space>>> {
    let repo = SpaceRepository::new(state.get_db());
    let spaces = repo.find_all(&user.restaurant).await?;
    Ok(Json(spaces))
}

/// GET /api/spaces/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Space>> {
    let repo = SpaceRepository::new(state.get_db());
    let space = repo
        .find_by_id(&user.restaurant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Space {} not found", id)))?;
    Ok(Json(space))
}

/// GET /api/spaces/:id/tables - tables within one space
pub async fn list_tables(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.get_db());
    let tables = repo.find_by_space(&user.restaurant, &id).await?;
    Ok(Json(tables))
}

/// POST /api/spaces
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<SpaceCreate>,
) -> AppResult<Json<Space>> {
    let repo = SpaceRepository::new(state.get_db());
    let space = repo.create(&user.restaurant, payload).await?;
    Ok(Json(space))
}

/// PUT /api/spaces/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<SpaceUpdate>,
) -> AppResult<Json<Space>> {
    let repo = SpaceRepository::new(state.get_db());
    let space = repo.update(&user.restaurant, &id, payload).await?;
    Ok(Json(space))
}

/// DELETE /api/spaces/:id - refused while active tables remain in the space
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = SpaceRepository::new(state.get_db());
    let result = repo.delete(&user.restaurant, &id).await?;
    Ok(Json(result))
}
