use std::sync::Arc;

use sqlx::SqlitePool;

use crate::gallery::DexGallery;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only pool over the collection database.
    pub db: SqlitePool,
    /// Pokédex list loaded at startup; empty when no list is configured.
    pub gallery: Arc<DexGallery>,
}
