//! Authentication Handlers
//!
//! Registration creates the tenant (restaurant) together with its first
//! admin account. Login uses a fixed delay and a unified error message so
//! response timing and wording never reveal whether a username exists.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Restaurant, Staff, StaffCreate, StaffRole};
use crate::db::repository::{RestaurantRepository, StaffRepository};
use crate::security_log;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Restaurant name is required"))]
    pub restaurant_name: String,
    pub owner_name: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Restaurant id as "restaurant:xxx"; optional when the username is
    /// unambiguous across tenants
    pub restaurant: Option<String>,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: StaffRole,
    pub restaurant: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<&Staff> for UserInfo {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            username: staff.username.clone(),
            display_name: staff.display_name.clone(),
            role: staff.role,
            restaurant: staff.restaurant.to_string(),
            is_active: staff.is_active,
            created_at: staff.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

fn issue_token(state: &ServerState, staff: &Staff) -> AppResult<String> {
    let staff_id = staff.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state
        .get_jwt_service()
        .generate_token(
            &staff_id,
            &staff.username,
            staff.role,
            &staff.restaurant.to_string(),
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

/// POST /api/auth/register - create a restaurant and its admin account
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if req.restaurant_name.trim().is_empty() || req.username.trim().is_empty() {
        return Err(AppError::validation("Name fields cannot be blank"));
    }

    let restaurants = RestaurantRepository::new(state.get_db());
    let restaurant = restaurants
        .create(Restaurant {
            id: None,
            name: req.restaurant_name.trim().to_string(),
            owner_name: req.owner_name.trim().to_string(),
            phone: req.phone,
            subscription: None,
            is_active: true,
            created_at: now_millis(),
        })
        .await?;

    let restaurant_id = restaurant
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Restaurant created without id"))?;

    let staff_repo = StaffRepository::new(state.get_db());
    let admin = staff_repo
        .create(
            &restaurant_id,
            StaffCreate {
                username: req.username,
                password: req.password,
                display_name: req.display_name,
                role: StaffRole::Admin,
            },
        )
        .await?;

    tracing::info!(
        restaurant = %restaurant_id,
        username = %admin.username,
        "Restaurant registered"
    );

    let token = issue_token(&state, &admin)?;
    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&admin),
    }))
}

/// POST /api/auth/login - authenticate and return a JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let db = state.get_db();
    let username = req.username.clone();

    let staff: Option<Staff> = match &req.restaurant {
        Some(restaurant) => {
            let repo = StaffRepository::new(db);
            let rid = crate::db::repository::parse_record_id(restaurant, "restaurant")?;
            repo.find_by_username(&rid, &username).await?
        }
        None => {
            let mut result = db
                .query("SELECT * FROM staff WHERE username = $username LIMIT 1")
                .bind(("username", username.clone()))
                .await
                .map_err(|e| AppError::database(format!("Query failed: {}", e)))?;
            result
                .take(0)
                .map_err(|e| AppError::database(format!("Failed to parse staff: {}", e)))?
        }
    };

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let staff = match staff {
        Some(s) => {
            if !s.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }
            let password_valid = s
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    username = username.clone(),
                    reason = "invalid_credentials"
                );
                return Err(AppError::invalid_credentials());
            }
            s
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                username = username.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let token = issue_token(&state, &staff)?;

    tracing::info!(
        username = %staff.username,
        restaurant = %staff.restaurant,
        "User logged in"
    );

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&staff),
    }))
}

/// GET /api/auth/me - fresh profile of the authenticated staff member
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let repo = StaffRepository::new(state.get_db());
    let staff = repo
        .find_by_id(&user.restaurant, &user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Staff member not found"))?;
    Ok(Json(UserInfo::from(&staff)))
}
