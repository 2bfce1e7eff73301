//! # medref-service
//!
//! HTTP service for the medication reference and interaction checker.
//!
//! This crate exposes the data loaded by the medref-loader crate over a
//! JSON API built on axum: interaction checks, name resolution, catalog
//! browsing and autocomplete. All state is read-only after startup.

#![warn(missing_docs)]

pub mod config;
pub mod error;
#[allow(missing_docs)]
pub mod handlers;
pub mod router;
mod server;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use router::api_router;
pub use server::MedrefServer;
