//! Router configuration and server setup.

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter(|o| o.as_str() != "*")
        .filter_map(|o| o.parse().ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/api/health", get(handlers::health))
        // Communities
        .route("/api/communities", get(handlers::list_communities))
        .route("/api/communities", post(handlers::create_community))
        .route("/api/communities/connect", post(handlers::connect_community))
        .route("/api/communities/:id", get(handlers::get_community))
        .route("/api/communities/:id", put(handlers::update_community))
        .route(
            "/api/communities/:id/documents",
            post(handlers::add_documents),
        )
        .route(
            "/api/communities/:id/deploy",
            post(handlers::deploy_community),
        )
        .route("/api/communities/:id/pause", post(handlers::pause_community))
        .route("/api/communities/:id/post-now", post(handlers::post_now))
        // Webhooks
        .route(
            "/api/webhooks/telegram/:id",
            post(handlers::telegram_webhook),
        )
        // Apply middleware
        .layer(cors)
        .with_state(state)
}

/// Starts the API server.
pub async fn serve(config: ApiConfig, state: AppState) -> Result<(), std::io::Error> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);
    axum::serve(listener, create_router(state)).await
}
