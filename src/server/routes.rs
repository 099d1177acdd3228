use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::server::AppState;
use crate::tile::{NewTile, TileUpdate};

#[derive(Deserialize)]
pub struct CoordinatesParams {
    pub x: i64,
    pub y: i64,
}

#[derive(Deserialize)]
pub struct GridParams {
    #[serde(rename = "maxX")]
    pub max_x: i64,
    #[serde(rename = "maxY")]
    pub max_y: i64,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /tiles - create a tile from the request body
pub async fn create_tile(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    // Decoded from raw bytes; any content type is accepted.
    let payload: NewTile = serde_json::from_slice(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))?;

    // The type string is stored as given, known terrain or not.
    let tile = state.store.create(&payload)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(serde_json::to_value(&tile).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?))
}

/// GET /tiles/{id} - fetch one tile by id
pub async fn get_tile(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let Path(id) = id
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))?;

    // Every lookup failure reads as absence, store errors included.
    let tile = state.store.get_by_id(id)
        .map_err(|e| (StatusCode::NOT_FOUND, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(serde_json::to_value(&tile).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?))
}

/// GET /tiles/coordinates?x=..&y=.. - fetch the tile at a grid cell
pub async fn get_tile_by_coordinates(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CoordinatesParams>, QueryRejection>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let Query(params) = params
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))?;

    let tile = state.store.get_by_coordinates(params.x, params.y)
        .map_err(|e| (StatusCode::NOT_FOUND, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(serde_json::to_value(&tile).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?))
}

/// GET /tiles - list every tile
pub async fn list_tiles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let tiles = state.store.get_all()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(serde_json::to_value(&tiles).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?))
}

/// PUT /tiles - overwrite a tile row by its id
pub async fn update_tile(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let payload: TileUpdate = serde_json::from_slice(&body)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))?;

    // Ids with no matching row still report success.
    state.store.update(&payload)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(StatusCode::OK)
}

/// DELETE /tiles/{id} - remove a tile by id
pub async fn delete_tile(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let Path(id) = id
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))?;

    state.store.delete(id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(StatusCode::OK)
}

/// POST /init-tiles?maxX=..&maxY=.. - fill the grid with random terrain
pub async fn init_tiles(
    State(state): State<Arc<AppState>>,
    params: Result<Query<GridParams>, QueryRejection>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let Query(params) = params
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))?;

    let mut rng = state.rng.lock().expect("terrain rng mutex poisoned");
    let created = state.store.initialize_grid(params.max_x, params.max_y, &mut *rng)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    tracing::info!("Initialized grid: {} tiles created", created);
    Ok(StatusCode::OK)
}
