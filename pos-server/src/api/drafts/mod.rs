//! Table draft API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/drafts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route(
            "/{table_id}",
            put(handler::save)
                .get(handler::get_by_table)
                .delete(handler::delete),
        )
        .route("/{table_id}/kot", post(handler::send_kot))
        .route("/{table_id}/kot/printed", post(handler::mark_kot_printed))
        .route("/{table_id}/clear", post(handler::clear))
}
