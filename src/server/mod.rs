use axum::{
    Router,
    routing::{get, post},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::storage::TileStore;

pub mod routes;

/// Server state
pub struct AppState {
    pub store: TileStore,
    pub rng: Mutex<ChaCha8Rng>,
}

impl AppState {
    /// Build server state around an open store.
    ///
    /// A seed pins the terrain sequence used by grid initialization; without
    /// one the sequence is drawn from OS entropy.
    pub fn new(store: TileStore, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }
}

/// Build the router with every tile route attached
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/tiles",
            post(routes::create_tile)
                .get(routes::list_tiles)
                .put(routes::update_tile),
        )
        .route("/tiles/coordinates", get(routes::get_tile_by_coordinates))
        .route(
            "/tiles/{id}",
            get(routes::get_tile).delete(routes::delete_tile),
        )
        .route("/init-tiles", post(routes::init_tiles))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
