//! Plan & Subscription Handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Plan, PlanCreate, Restaurant, Subscription};
use crate::db::repository::{PlanRepository, RestaurantRepository};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// GET /api/plans - active plans, cheapest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Plan>>> {
    let repo = PlanRepository::new(state.get_db());
    let plans = repo.find_all().await?;
    Ok(Json(plans))
}

/// POST /api/plans - admin only
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PlanCreate>,
) -> AppResult<Json<Plan>> {
    let repo = PlanRepository::new(state.get_db());
    let plan = repo.create(payload).await?;
    Ok(Json(plan))
}

#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    /// Plan id as "plan:xxx"
    pub plan: String,
}

/// POST /api/subscription/activate - attach a plan to the restaurant
///
/// Expiry is never stored; the gate recomputes it from `started_at` and the
/// plan's duration. Activation resets the clock to now.
pub async fn activate(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ActivateRequest>,
) -> AppResult<Json<Restaurant>> {
    let plans = PlanRepository::new(state.get_db());
    let plan = plans
        .find_by_id(&payload.plan)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Plan {} not found", payload.plan)))?;
    if !plan.is_active {
        return Err(AppError::business_rule("Plan is no longer offered"));
    }
    let plan_rid = plan
        .id
        .ok_or_else(|| AppError::internal("Plan without id"))?;

    let restaurants = RestaurantRepository::new(state.get_db());
    let restaurant = restaurants
        .set_subscription(
            &user.restaurant,
            Subscription {
                plan: plan_rid,
                started_at: now_millis(),
            },
        )
        .await?;

    // The cached verdict is stale now
    state.subscriptions().invalidate(&user.restaurant);

    tracing::info!(
        restaurant = %user.restaurant,
        plan = %payload.plan,
        "Subscription activated"
    );

    Ok(Json(restaurant))
}
