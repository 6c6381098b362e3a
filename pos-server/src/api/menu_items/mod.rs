//! Menu item API module
//!
//! Includes the per-space price override sub-resource.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/space-prices",
            get(handler::list_space_prices).put(handler::set_space_price),
        )
        .route(
            "/{id}/space-prices/{space_id}",
            axum::routing::delete(handler::delete_space_price),
        )
}
