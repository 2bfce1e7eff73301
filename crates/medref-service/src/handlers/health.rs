//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::server::MedrefServer;

/// Health check body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the server is serving.
    pub status: &'static str,
    /// Records in the catalog.
    pub medications: usize,
    /// Registered synonym keys.
    pub synonyms: usize,
    /// Medications with at least one graph edge.
    pub graph_nodes: usize,
    /// Active interaction provider.
    pub provider: &'static str,
}

/// `GET /api/health`
pub async fn check(State(server): State<MedrefServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        medications: server.catalog().len(),
        synonyms: server.index().len(),
        graph_nodes: server.graph_nodes(),
        provider: server.provider().name(),
    })
}
