//! Server Implementation
//!
//! HTTP server startup and router assembly.

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::auth::{require_auth, require_subscription};
use crate::core::{Config, Result, ServerState};

/// HTTP request access log
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core APIs
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::upload::router())
        // Data model APIs
        .merge(crate::api::spaces::router())
        .merge(crate::api::tables::router())
        .merge(crate::api::categories::router())
        .merge(crate::api::menu_items::router())
        .merge(crate::api::drafts::router())
        .merge(crate::api::bills::router())
        .merge(crate::api::plans::router())
        .merge(crate::api::staff::router())
}

/// Attach middleware and state to the bare router
///
/// Ordering (outermost first): access log, CORS, authentication,
/// subscription gate.
pub fn build_app_with_state(state: ServerState) -> Router {
    build_app()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_subscription,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        let app = build_app_with_state(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("POS server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
