use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::gallery::DexEntry;
use crate::state::AppState;

/// GET /api/dex
pub async fn handle_list_dex(State(state): State<AppState>) -> Json<Vec<DexEntry>> {
    Json(state.gallery.entries().to_vec())
}

/// GET /api/dex/:number
pub async fn handle_get_dex(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<DexEntry>, AppError> {
    let number: i64 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("'{raw}' is not a dex number")))?;
    state
        .gallery
        .get(number)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No Pokédex entry #{number}")))
}
