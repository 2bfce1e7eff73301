//! Medication browsing endpoints.
//!
//! - `GET /api/medications` lists with optional text and tag filters
//! - `GET /api/medications/suggest` returns autocomplete names
//! - `GET /api/medications/:slug` returns one record

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use medref_loader::DEFAULT_SUGGESTION_LIMIT;
use medref_types::MedicationRecord;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::MedrefServer;

/// Upper bound on requested suggestions.
const MAX_SUGGESTION_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub medications: Vec<MedicationRecord>,
    pub tags: Vec<String>,
}

/// `GET /api/medications`
pub async fn list(
    State(server): State<MedrefServer>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(query) = query?;
    let catalog = server.catalog();

    let medications = catalog
        .search(&query.q, query.tag.as_deref())
        .into_iter()
        .cloned()
        .collect();
    let tags = catalog.tags().into_iter().map(str::to_string).collect();

    Ok(Json(ListResponse { medications, tags }))
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// `GET /api/medications/suggest`
pub async fn suggest(
    State(server): State<MedrefServer>,
    query: Result<Query<SuggestQuery>, QueryRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Query(query) = query?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
        .min(MAX_SUGGESTION_LIMIT);

    let suggestions = server
        .catalog()
        .suggest(&query.q, limit)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(SuggestResponse { suggestions }))
}

/// `GET /api/medications/:slug`
pub async fn detail(
    State(server): State<MedrefServer>,
    Path(slug): Path<String>,
) -> Result<Json<MedicationRecord>, ApiError> {
    server
        .catalog()
        .get(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Medication not found: {slug}")))
}
