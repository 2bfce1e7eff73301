//! HTTP endpoint handlers.

pub mod health;
pub mod interactions;
pub mod medications;
pub mod resolve;
