//! Name resolution endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use medref_types::CanonicalMedication;
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::MedrefServer;

/// Query for `GET /api/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    /// Free-text medication name.
    #[serde(default)]
    pub name: String,
}

/// `GET /api/resolve?name=` maps a brand name, alias or spelling variant
/// to its canonical medication.
pub async fn resolve(
    State(server): State<MedrefServer>,
    query: Result<Query<ResolveQuery>, QueryRejection>,
) -> Result<Json<CanonicalMedication>, ApiError> {
    let Query(query) = query?;

    server
        .index()
        .resolve(&query.name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No medication matches \"{}\"", query.name)))
}
