//! Breed short-post review endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use barkboard_common::catalog::{
    filter_shorts, short_breed_options, sort_shorts, BreedChoice, LocationBucket, ShortFilter,
    ShortSortKey, ShortView, SortOrder,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

/// Query parameters for the short-post listing
#[derive(Debug, Default, Deserialize)]
pub struct ShortsQuery {
    /// Substring search over name, animal id, breed text, and post body
    #[serde(default)]
    pub search: String,
    /// Consolidated breed name, or empty/"all"
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub location: String,
    /// Table column to sort by ("name", "animal_id", "breed")
    #[serde(default)]
    pub sort: String,
    /// "asc" or "desc"
    #[serde(default)]
    pub order: String,
}

/// Short-post listing response
#[derive(Debug, Serialize)]
pub struct ShortsResponse {
    pub total: usize,
    pub matched: usize,
    pub shorts: Vec<ShortView>,
    /// Distinct consolidated breeds across the whole batch, for the
    /// dropdown
    pub breeds: Vec<String>,
}

/// GET /api/shorts
pub async fn list_shorts(
    State(state): State<AppState>,
    Query(query): Query<ShortsQuery>,
) -> Result<Json<ShortsResponse>, ApiError> {
    let batch = state
        .cache
        .shorts()
        .await
        .ok_or(ApiError::NotLoaded("Short posts"))?;

    let criteria = ShortFilter {
        search: query.search.clone(),
        breed: BreedChoice::parse(&query.breed),
        location: LocationBucket::parse(&query.location),
    };

    let survivors = sort_shorts(
        filter_shorts(&batch, &criteria),
        ShortSortKey::parse(&query.sort),
        SortOrder::parse(&query.order),
    );

    Ok(Json(ShortsResponse {
        total: batch.len(),
        matched: survivors.len(),
        shorts: survivors.into_iter().map(ShortView::project).collect(),
        breeds: short_breed_options(&batch),
    }))
}
