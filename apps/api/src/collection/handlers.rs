use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::collection::query::ListParams;
use crate::collection::store::{collection_stats, get_record, list_records};
use crate::errors::AppError;
use crate::models::collection::{CollectionDetail, CollectionPage, CollectionStats};
use crate::state::AppState;

/// GET /api/pokemon
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<CollectionPage>, AppError> {
    let query = params.into_query()?;
    let page = list_records(&state.db, &query).await?;
    Ok(Json(page))
}

/// GET /api/pokemon/:id
pub async fn handle_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<CollectionDetail>, AppError> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("'{raw_id}' is not a record id")))?;

    let detail = get_record(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pokémon {id} not found")))?;
    Ok(Json(detail))
}

/// GET /api/stats
pub async fn handle_stats(
    State(state): State<AppState>,
) -> Result<Json<CollectionStats>, AppError> {
    Ok(Json(collection_stats(&state.db).await?))
}
