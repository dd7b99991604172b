//! HTTP route handlers for the admissions API
//!
//! The GraphQL endpoint carries the domain surface; the handlers here
//! cover the operational routes around it:
//! - Health check and status endpoints

pub mod health;

pub use health::{health_router, HealthState};
