//! barkboard-web library - catalog browsing service
//!
//! Serves the dog catalog and its review surfaces over a JSON API plus an
//! embedded single-page UI. All catalog semantics live in
//! `barkboard-common`; this crate adds the fetch/cache boundary and the
//! HTTP layer on top of it.

use std::sync::Arc;

use axum::Router;
use barkboard_common::events::EventBus;
use barkboard_common::favorites::{FavoriteSet, FavoriteStore};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod cache;
pub mod upstream;

use cache::CatalogCache;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Cached record batches for all three surfaces
    pub cache: Arc<CatalogCache>,
    /// Favorite dog ids, persisted through `store` on every toggle
    pub favorites: Arc<Mutex<FavoriteSet>>,
    /// File-backed favorites persistence
    pub store: Arc<FavoriteStore>,
    /// Event bus feeding the SSE stream
    pub bus: EventBus,
}

impl AppState {
    /// Create application state, loading the persisted favorites
    pub fn new(cache: Arc<CatalogCache>, store: FavoriteStore, bus: EventBus) -> Self {
        let favorites = store.load();
        Self {
            cache,
            favorites: Arc::new(Mutex::new(favorites)),
            store: Arc::new(store),
            bus,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // Embedded UI
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        // Catalog
        .route("/api/dogs", get(api::list_dogs))
        .route("/api/dogs/:id", get(api::get_dog))
        .route("/api/breeds", get(api::list_breeds))
        // Review surfaces
        .route("/api/shorts", get(api::list_shorts))
        .route("/api/changes", get(api::list_changes))
        // Favorites
        .route("/api/favorites", get(api::list_favorites))
        .route("/api/favorites/:id/toggle", post(api::toggle_favorite))
        // SSE event stream
        .route("/api/events", get(api::event_stream))
        // Build information
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .with_state(state)
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
