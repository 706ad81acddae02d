//! Axum HTTP API server for the RefHub referral marketplace.
//!
//! This crate provides:
//! - REST endpoints for auth, profiles, jobs, companies and applications
//! - HS256 bearer tokens and Argon2 password hashing
//! - Role-based access checks on every mutating endpoint
//! - Rate limiting, security headers and Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
