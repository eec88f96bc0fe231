//! Favorites endpoints
//!
//! The favorite set lives in memory and is written through to the store on
//! every toggle, so it survives service restarts.

use axum::{
    extract::{Path, State},
    Json,
};
use barkboard_common::events::CatalogEvent;
use serde::Serialize;

use super::ApiError;
use crate::AppState;

/// Favorites listing response
#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    /// Sorted dog ids
    pub favorites: Vec<String>,
    pub count: usize,
}

/// Toggle response
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: String,
    /// State after the toggle
    pub favorite: bool,
    pub count: usize,
}

/// GET /api/favorites
pub async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let favorites = state.favorites.lock().await;
    Json(FavoritesResponse {
        favorites: favorites.ids(),
        count: favorites.len(),
    })
}

/// POST /api/favorites/:id/toggle
///
/// Flips membership for one id and persists the whole set. Ids are not
/// validated against the catalog, so favorites work while the first batch
/// is still loading.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let mut favorites = state.favorites.lock().await;
    let favorite = favorites.toggle(&id);
    let count = favorites.len();
    state
        .store
        .save(&favorites)
        .map_err(|e| ApiError::Store(e.to_string()))?;
    drop(favorites);

    state.bus.emit(CatalogEvent::FavoritesChanged {
        id: id.clone(),
        favorite,
        count,
        timestamp: chrono::Utc::now(),
    });

    Ok(Json(ToggleResponse {
        id,
        favorite,
        count,
    }))
}
