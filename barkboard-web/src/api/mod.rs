//! HTTP API handlers for barkboard-web

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub mod buildinfo;
pub mod changes;
pub mod dogs;
pub mod events;
pub mod favorites;
pub mod health;
pub mod shorts;
pub mod ui;

pub use buildinfo::get_build_info;
pub use changes::list_changes;
pub use dogs::{get_dog, list_breeds, list_dogs};
pub use events::event_stream;
pub use favorites::{list_favorites, toggle_favorite};
pub use health::health_routes;
pub use shorts::list_shorts;
pub use ui::{serve_app_js, serve_index};

/// Errors shared by the catalog endpoints
#[derive(Debug)]
pub enum ApiError {
    /// No snapshot exists for the surface yet; distinct from an empty
    /// result set
    NotLoaded(&'static str),
    /// Unknown record id
    NotFound(String),
    /// Favorites persistence failed
    Store(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotLoaded(surface) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{} not loaded yet, try again shortly", surface),
            ),
            ApiError::NotFound(id) => (StatusCode::NOT_FOUND, format!("No dog with id {}", id)),
            ApiError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to persist favorites: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
