//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate, SpacePrice, SpacePriceSet};
use crate::db::repository::{MenuItemRepository, SpacePriceRepository};
use crate::utils::money::MAX_PRICE;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Category id as "category:xxx"
    pub category: Option<String>,
}

/// GET /api/menu-items?category= - all items, optionally filtered
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = match query.category {
        Some(category) => repo.find_by_category(&user.restaurant, &category).await?,
        None => repo.find_all(&user.restaurant).await?,
    };
    Ok(Json(items))
}

/// GET /api/menu-items/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&user.restaurant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(&user.restaurant, payload).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/:id
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.update(&user.restaurant, &id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - also removes the item's price overrides
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.get_db());
    let result = repo.delete(&user.restaurant, &id).await?;
    Ok(Json(result))
}

/// GET /api/menu-items/:id/space-prices - all overrides for the item
pub async fn list_space_prices(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<SpacePrice>>> {
    let repo = SpacePriceRepository::new(state.get_db());
    let prices = repo.find_by_item(&user.restaurant, &id).await?;
    Ok(Json(prices))
}

/// PUT /api/menu-items/:id/space-prices - create or replace one override
pub async fn set_space_price(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<SpacePriceSet>,
) -> AppResult<Json<SpacePrice>> {
    if !payload.price.is_finite() || payload.price < 0.0 || payload.price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "Price out of range: {}",
            payload.price
        )));
    }

    // The item must exist and belong to this restaurant
    let items = MenuItemRepository::new(state.get_db());
    items
        .find_by_id(&user.restaurant, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;

    let repo = SpacePriceRepository::new(state.get_db());
    let price = repo.set(&user.restaurant, &id, payload).await?;
    Ok(Json(price))
}

/// DELETE /api/menu-items/:id/space-prices/:space_id
pub async fn delete_space_price(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path((id, space_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let repo = SpacePriceRepository::new(state.get_db());
    let result = repo.delete(&user.restaurant, &id, &space_id).await?;
    Ok(Json(result))
}
