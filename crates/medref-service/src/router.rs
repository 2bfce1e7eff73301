//! HTTP router.
//!
//! Every route is nested under `/api/`. Path params use `:param` syntax
//! (axum 0.7).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::server::MedrefServer;

/// Builds the API router over shared server state.
pub fn api_router(server: MedrefServer) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/interactions", post(handlers::interactions::check))
        .route("/medications", get(handlers::medications::list))
        .route("/medications/suggest", get(handlers::medications::suggest))
        .route("/medications/:slug", get(handlers::medications::detail))
        .route("/resolve", get(handlers::resolve::resolve))
        .with_state(server);

    Router::new().nest("/api", api)
}
