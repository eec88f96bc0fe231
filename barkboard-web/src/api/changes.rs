//! Proposed-change review endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use barkboard_common::catalog::{category_options, filter_changes, ChangeFilter, ChangeView};
use barkboard_common::model::ShelterSite;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

/// Query parameters for the proposed-change listing
#[derive(Debug, Default, Deserialize)]
pub struct ChangesQuery {
    /// Substring search over name, animal id, comment, and proposed value
    #[serde(default)]
    pub search: String,
    /// Exact category, or empty/"all"
    #[serde(default)]
    pub category: String,
    /// Site code ("DCAS", "FCAS", "CAC"), or empty/"all"
    #[serde(default)]
    pub site: String,
}

/// Proposed-change listing response
#[derive(Debug, Serialize)]
pub struct ChangesResponse {
    pub total: usize,
    pub matched: usize,
    pub changes: Vec<ChangeView>,
    /// Distinct categories across the whole batch, for the dropdown
    pub categories: Vec<String>,
}

/// GET /api/changes
pub async fn list_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> Result<Json<ChangesResponse>, ApiError> {
    let batch = state
        .cache
        .changes()
        .await
        .ok_or(ApiError::NotLoaded("Proposed changes"))?;

    let category = query.category.trim();
    let criteria = ChangeFilter {
        search: query.search.clone(),
        category: (!category.is_empty() && !category.eq_ignore_ascii_case("all"))
            .then(|| category.to_string()),
        site: ShelterSite::from_code(query.site.trim()),
    };

    let survivors = filter_changes(&batch, &criteria);

    Ok(Json(ChangesResponse {
        total: batch.len(),
        matched: survivors.len(),
        changes: survivors.into_iter().map(ChangeView::project).collect(),
        categories: category_options(&batch),
    }))
}
