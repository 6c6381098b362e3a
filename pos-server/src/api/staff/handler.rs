//! Staff API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Staff, StaffCreate, StaffUpdate};
use crate::db::repository::StaffRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/staff - all staff of the restaurant
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Staff>>> {
    let repo = StaffRepository::new(state.get_db());
    let staff = repo.find_all(&user.restaurant).await?;
    Ok(Json(staff))
}

/// POST /api/staff
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<Staff>> {
    let repo = StaffRepository::new(state.get_db());
    let staff = repo.create(&user.restaurant, payload).await?;
    Ok(Json(staff))
}

/// PUT /api/staff/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<Staff>> {
    let repo = StaffRepository::new(state.get_db());
    let staff = repo.update(&user.restaurant, &id, payload).await?;
    Ok(Json(staff))
}

/// DELETE /api/staff/:id - an admin cannot delete their own account
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let target = crate::db::repository::parse_record_id(&id, "staff")?;
    if target.to_string() == user.id {
        return Err(AppError::business_rule("Cannot delete your own account"));
    }

    let repo = StaffRepository::new(state.get_db());
    let result = repo.delete(&user.restaurant, &id).await?;
    Ok(Json(result))
}
