//! End-to-end tests for the tile HTTP API

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use gridworld::server::{AppState, router};
use gridworld::storage::TileStore;
use gridworld::tile::Tile;

fn test_app() -> Router {
    let store = TileStore::open_in_memory().unwrap();
    router(Arc::new(AppState::new(store, Some(42))))
}

async fn send(app: &Router, method: &str, uri: &str, body: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_tile(response: axum::response::Response) -> Tile {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn create_tile(app: &Router, x: i64, y: i64, kind: &str) -> Tile {
    let body = format!(
        r#"{{"x_coordinate": {}, "y_coordinate": {}, "type": "{}"}}"#,
        x, y, kind
    );
    let response = send(app, "POST", "/tiles", &body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_tile(response).await
}

#[tokio::test]
async fn test_create_tile_returns_stored_row() {
    let app = test_app();

    let tile = create_tile(&app, 1, 2, "grass").await;
    assert!(tile.id > 0);
    assert_eq!(tile.x_coordinate, 1);
    assert_eq!(tile.y_coordinate, 2);
    assert_eq!(tile.kind, "grass");
    assert!(tile.created_at.timestamp() > 0);
    assert!(tile.updated_at.timestamp() > 0);
}

#[tokio::test]
async fn test_create_tile_rejects_malformed_json() {
    let app = test_app();

    let response = send(&app, "POST", "/tiles", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(error.get("error").is_some());
}

#[tokio::test]
async fn test_create_tile_accepts_unknown_terrain() {
    let app = test_app();

    // Terrain names are not validated at the API boundary.
    let tile = create_tile(&app, 0, 0, "lava").await;
    assert_eq!(tile.kind, "lava");
}

#[tokio::test]
async fn test_create_tile_defaults_missing_fields() {
    let app = test_app();

    let response = send(&app, "POST", "/tiles", "{}").await;
    assert_eq!(response.status(), StatusCode::OK);

    let tile = body_tile(response).await;
    assert_eq!(tile.x_coordinate, 0);
    assert_eq!(tile.y_coordinate, 0);
    assert_eq!(tile.kind, "");
}

#[tokio::test]
async fn test_get_tile_roundtrip() {
    let app = test_app();
    let created = create_tile(&app, 5, 6, "water").await;

    let response = send(&app, "GET", &format!("/tiles/{}", created.id), "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_tile(response).await, created);
}

#[tokio::test]
async fn test_get_tile_unknown_id_is_404() {
    let app = test_app();

    let response = send(&app, "GET", "/tiles/12345", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_tile_non_integer_id_is_400() {
    let app = test_app();

    let response = send(&app, "GET", "/tiles/abc", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_tile_by_coordinates() {
    let app = test_app();
    let created = create_tile(&app, 3, 4, "mountain").await;

    let response = send(&app, "GET", "/tiles/coordinates?x=3&y=4", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_tile(response).await, created);

    let response = send(&app, "GET", "/tiles/coordinates?x=9&y=9", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_tile_by_coordinates_bad_query_is_400() {
    let app = test_app();

    let response = send(&app, "GET", "/tiles/coordinates?x=a&y=2", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/tiles/coordinates?x=1", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_tiles() {
    let app = test_app();

    let response = send(&app, "GET", "/tiles", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"[]");

    create_tile(&app, 0, 0, "grass").await;
    create_tile(&app, 0, 1, "water").await;

    let response = send(&app, "GET", "/tiles", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    let tiles: Vec<Tile> = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(tiles.len(), 2);
}

#[tokio::test]
async fn test_update_tile() {
    let app = test_app();
    let created = create_tile(&app, 1, 1, "grass").await;

    let body = format!(
        r#"{{"id": {}, "x_coordinate": 9, "y_coordinate": 8, "type": "water"}}"#,
        created.id
    );
    let response = send(&app, "PUT", "/tiles", &body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    let response = send(&app, "GET", &format!("/tiles/{}", created.id), "").await;
    let updated = body_tile(response).await;
    assert_eq!(updated.x_coordinate, 9);
    assert_eq!(updated.y_coordinate, 8);
    assert_eq!(updated.kind, "water");
}

#[tokio::test]
async fn test_update_tile_malformed_json_is_400() {
    let app = test_app();

    let response = send(&app, "PUT", "/tiles", "not json at all").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_id_reports_success() {
    let app = test_app();

    let body = r#"{"id": 12345, "x_coordinate": 0, "y_coordinate": 0, "type": "grass"}"#;
    let response = send(&app, "PUT", "/tiles", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/tiles", "").await;
    let tiles: Vec<Tile> = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(tiles.is_empty());
}

#[tokio::test]
async fn test_delete_tile() {
    let app = test_app();
    let created = create_tile(&app, 2, 2, "water").await;

    let response = send(&app, "DELETE", &format!("/tiles/{}", created.id), "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    let response = send(&app, "GET", &format!("/tiles/{}", created.id), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting the same id again still reports success.
    let response = send(&app, "DELETE", &format!("/tiles/{}", created.id), "").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_non_integer_id_is_400() {
    let app = test_app();

    let response = send(&app, "DELETE", "/tiles/abc", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_init_tiles_fills_grid() {
    let app = test_app();

    let response = send(&app, "POST", "/init-tiles?maxX=2&maxY=1", "").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    let response = send(&app, "GET", "/tiles", "").await;
    let tiles: Vec<Tile> = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(tiles.len(), 6);

    for x in 0..=2 {
        for y in 0..=1 {
            assert!(
                tiles
                    .iter()
                    .any(|t| t.x_coordinate == x && t.y_coordinate == y)
            );
        }
    }
    for tile in &tiles {
        assert!(
            ["mountain", "grass", "water"].contains(&tile.kind.as_str()),
            "unexpected terrain {}",
            tile.kind
        );
    }
}

#[tokio::test]
async fn test_init_tiles_bad_query_is_400() {
    let app = test_app();

    let response = send(&app, "POST", "/init-tiles", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "POST", "/init-tiles?maxX=2", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "POST", "/init-tiles?maxX=two&maxY=1", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seeded_apps_generate_identical_grids() {
    let layout = |tiles: Vec<Tile>| {
        tiles
            .into_iter()
            .map(|t| (t.x_coordinate, t.y_coordinate, t.kind))
            .collect::<Vec<_>>()
    };

    let mut grids = Vec::new();
    for _ in 0..2 {
        let app = test_app();
        let response = send(&app, "POST", "/init-tiles?maxX=2&maxY=2", "").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "GET", "/tiles", "").await;
        let tiles: Vec<Tile> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        grids.push(layout(tiles));
    }

    assert_eq!(grids[0], grids[1]);
}
