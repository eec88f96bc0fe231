//! Dog catalog endpoints
//!
//! Every response is derived fresh from the latest immutable snapshot;
//! nothing here caches filtered or sorted intermediates.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use barkboard_common::catalog::{
    breed_options, derive_view, BreedChoice, CatalogView, DogView, FilterCriteria, FosterChoice,
    LocationBucket, SortKey,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

/// Query parameters for the catalog listing
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Substring search over name, breed text, and id
    #[serde(default)]
    pub search: String,
    /// Normalized breed name, or empty/"all"
    #[serde(default)]
    pub breed: String,
    /// Location bucket wire form ("all", "all_in_foster",
    /// "DCAS_in_shelter", ...)
    #[serde(default)]
    pub location: String,
    /// Explicit foster-status column filter ("foster", "not_foster")
    #[serde(default)]
    pub foster: String,
    /// Sort key wire form ("name", "age", "size", "level", ...)
    #[serde(default)]
    pub sort: String,
    /// Drop records without a usable adoption link
    #[serde(default)]
    pub adoptable_only: bool,
}

impl CatalogQuery {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone(),
            breed: BreedChoice::parse(&self.breed),
            location: LocationBucket::parse(&self.location),
            foster: FosterChoice::parse(&self.foster),
            require_adoption_link: self.adoptable_only,
        }
    }
}

/// GET /api/dogs
///
/// Returns the filtered, sorted, projected catalog. `total` is the batch
/// size before filtering so clients can tell "no data" from "nothing
/// matched".
pub async fn list_dogs(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogView>, ApiError> {
    let batch = state
        .cache
        .dogs()
        .await
        .ok_or(ApiError::NotLoaded("Dog catalog"))?;

    let view = derive_view(&batch, &query.criteria(), SortKey::parse(&query.sort));
    Ok(Json(view))
}

/// GET /api/dogs/:id
///
/// Returns the display projection of a single dog.
pub async fn get_dog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DogView>, ApiError> {
    let batch = state
        .cache
        .dogs()
        .await
        .ok_or(ApiError::NotLoaded("Dog catalog"))?;

    batch
        .iter()
        .find(|dog| dog.id == id)
        .map(|dog| Json(DogView::project(dog)))
        .ok_or(ApiError::NotFound(id))
}

/// Breed dropdown response
#[derive(Debug, Serialize)]
pub struct BreedsResponse {
    pub breeds: Vec<String>,
}

/// GET /api/breeds
///
/// Distinct normalized breed options across the whole batch, for the
/// filter dropdown.
pub async fn list_breeds(
    State(state): State<AppState>,
) -> Result<Json<BreedsResponse>, ApiError> {
    let batch = state
        .cache
        .dogs()
        .await
        .ok_or(ApiError::NotLoaded("Dog catalog"))?;

    Ok(Json(BreedsResponse {
        breeds: breed_options(&batch),
    }))
}
