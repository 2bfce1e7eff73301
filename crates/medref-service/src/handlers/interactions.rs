//! Interaction check endpoint.

use std::collections::HashSet;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use medref_loader::{dedupe_by_slug, CheckError};
use medref_types::{CanonicalMedication, InteractionResult};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::MedrefServer;

/// Request body for `POST /api/interactions`.
#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    /// Free-text medication names.
    #[serde(default)]
    pub drugs: Vec<String>,
}

/// Response body for `POST /api/interactions`.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    /// Flagged pairs, most severe first.
    pub interactions: Vec<InteractionResult>,
}

/// `POST /api/interactions`
///
/// Inputs are trimmed, blanks dropped and exact repeats removed. Every
/// remaining name must resolve; the resolved set is then de-duplicated by
/// slug and handed to the interaction provider.
pub async fn check(
    State(server): State<MedrefServer>,
    payload: Result<Json<InteractionRequest>, JsonRejection>,
) -> Result<Json<InteractionResponse>, ApiError> {
    let Json(request) = payload?;
    let drugs = clean_inputs(&request.drugs);

    if drugs.len() < 2 {
        return Err(CheckError::InsufficientInputs { found: drugs.len() }.into());
    }

    let resolved = server.index().resolve_all(&drugs).map_err(|unmatched| {
        tracing::info!(unmatched = ?unmatched, "Unresolved medication names");
        CheckError::Unresolved(unmatched)
    })?;

    let unique: Vec<CanonicalMedication> =
        dedupe_by_slug(&resolved).into_iter().cloned().collect();

    let provider = server.provider().clone();
    let interactions = tokio::task::spawn_blocking(move || provider.check(&unique))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    tracing::debug!(
        inputs = drugs.len(),
        flagged = interactions.len(),
        provider = server.provider().name(),
        "Interaction check complete"
    );

    Ok(Json(InteractionResponse { interactions }))
}

/// Trims, drops blanks and removes exact duplicates, keeping first-seen order.
fn clean_inputs(drugs: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    drugs
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty() && seen.insert(*d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_inputs() {
        let drugs = vec![
            " Ozempic ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "Ozempic".to_string(),
            "ozempic".to_string(),
            "Eliquis".to_string(),
        ];
        assert_eq!(clean_inputs(&drugs), vec!["Ozempic", "ozempic", "Eliquis"]);
    }
}
