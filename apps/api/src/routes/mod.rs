pub mod health;

use axum::{
    extract::OriginalUri,
    http::Method,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};
use tracing::info;

use crate::collection::handlers;
use crate::config::Config;
use crate::errors::AppError;
use crate::gallery::handlers as gallery;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Collection API
        .route("/pokemon", get(handlers::handle_list))
        .route("/pokemon/:id", get(handlers::handle_detail))
        .route("/stats", get(handlers::handle_stats))
        // Pokédex gallery
        .route("/dex", get(gallery::handle_list_dex))
        .route("/dex/:number", get(gallery::handle_get_dex))
        // Unknown API paths never reach the client bundle fallback
        .fallback(api_not_found);

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .with_state(state)
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No API route for {}", uri.path()))
}

/// Mounts screenshots and sprite crops under `/image`, and the built client
/// bundle (if configured) behind every unmatched path. Must wrap the API
/// router so API routes keep precedence.
pub fn with_static_assets(router: Router, config: &Config) -> Router {
    let router = router.nest_service("/image", ServeDir::new(&config.collection_dir));

    match &config.ui_dist {
        Some(dist) => {
            info!("Serving client bundle from {}", dist.display());
            let index = ServeFile::new(dist.join("index.html"));
            router.fallback_service(ServeDir::new(dist).fallback(index))
        }
        None => router,
    }
}

/// The API is read-only, so any origin may issue GETs.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}
