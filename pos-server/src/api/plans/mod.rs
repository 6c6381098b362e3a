//! Plan & subscription API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new().route("/api/plans", get(handler::list));

    let admin_routes = Router::new()
        .route("/api/plans", post(handler::create))
        .route("/api/subscription/activate", post(handler::activate))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(admin_routes)
}
