//! Subscription gate
//!
//! Mutating requests are rejected once a restaurant's subscription lapses.
//! Expiry is computed dynamically from the activation timestamp and the
//! plan's duration, and cached per restaurant for a few minutes so the gate
//! does not hit the database on every write.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::sync::Arc;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{PlanRepository, RestaurantRepository};
use crate::utils::time::DAY_MS;
use crate::utils::{AppError, AppResult};

/// How long a cached verdict stays valid
const CACHE_TTL_MS: i64 = 5 * 60 * 1000;

/// When a subscription runs out, given its activation time and plan length
pub fn expiry_of(started_at: i64, duration_days: i64) -> i64 {
    started_at + duration_days * DAY_MS
}

#[derive(Debug, Clone, Copy)]
struct CachedVerdict {
    /// None when the restaurant has no subscription at all
    expires_at: Option<i64>,
    cached_at: i64,
}

impl CachedVerdict {
    fn is_fresh(&self, now: i64) -> bool {
        now - self.cached_at < CACHE_TTL_MS
    }
}

/// Per-restaurant subscription checker with a TTL cache
#[derive(Clone)]
pub struct SubscriptionGate {
    restaurants: RestaurantRepository,
    plans: PlanRepository,
    cache: Arc<DashMap<String, CachedVerdict>>,
}

impl SubscriptionGate {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            restaurants: RestaurantRepository::new(db.clone()),
            plans: PlanRepository::new(db),
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Whether the restaurant currently holds an unexpired subscription
    pub async fn is_active(&self, restaurant: &RecordId, now: i64) -> AppResult<bool> {
        let key = restaurant.to_string();

        if let Some(cached) = self.cache.get(&key)
            && cached.is_fresh(now)
        {
            return Ok(matches!(*cached, CachedVerdict { expires_at: Some(exp), .. } if now < exp));
        }

        let expires_at = self.load_expiry(restaurant).await?;
        self.cache.insert(
            key,
            CachedVerdict {
                expires_at,
                cached_at: now,
            },
        );

        Ok(expires_at.is_some_and(|exp| now < exp))
    }

    async fn load_expiry(&self, restaurant: &RecordId) -> AppResult<Option<i64>> {
        let restaurant = self
            .restaurants
            .find_by_id(&restaurant.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant not found"))?;

        let Some(subscription) = restaurant.subscription else {
            return Ok(None);
        };

        let plan = self
            .plans
            .find_by_id(&subscription.plan.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("Subscription plan not found"))?;

        Ok(Some(expiry_of(subscription.started_at, plan.duration_days)))
    }

    /// Drop the cached verdict, e.g. right after a plan activation
    pub fn invalidate(&self, restaurant: &RecordId) {
        self.cache.remove(&restaurant.to_string());
    }
}

/// Reads stay available after expiry; these paths additionally accept writes
fn is_exempt_route(path: &str) -> bool {
    path.starts_with("/api/auth/") || path == "/api/subscription/activate"
}

/// Block mutating requests for restaurants without an active subscription
///
/// Runs after [`super::require_auth`]; requests that carry no
/// [`CurrentUser`] (public routes) pass through untouched.
pub async fn require_subscription(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let mutating = matches!(
        *req.method(),
        http::Method::POST | http::Method::PUT | http::Method::PATCH | http::Method::DELETE
    );
    if !mutating || is_exempt_route(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let Some(user) = req.extensions().get::<CurrentUser>() else {
        return Ok(next.run(req).await);
    };

    let now = crate::utils::time::now_millis();
    if state.subscriptions().is_active(&user.restaurant, now).await? {
        Ok(next.run(req).await)
    } else {
        Err(AppError::SubscriptionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_math() {
        let started = 1_700_000_000_000;
        assert_eq!(expiry_of(started, 30), started + 30 * DAY_MS);
        assert_eq!(expiry_of(started, 0), started);
    }

    #[test]
    fn test_cache_freshness_window() {
        let verdict = CachedVerdict {
            expires_at: Some(10),
            cached_at: 1_000,
        };
        assert!(verdict.is_fresh(1_000 + CACHE_TTL_MS - 1));
        assert!(!verdict.is_fresh(1_000 + CACHE_TTL_MS));
    }

    #[test]
    fn test_exempt_routes() {
        assert!(is_exempt_route("/api/auth/login"));
        assert!(is_exempt_route("/api/subscription/activate"));
        assert!(!is_exempt_route("/api/bills"));
    }
}
