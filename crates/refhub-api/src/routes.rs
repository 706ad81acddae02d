//! API routes.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::handlers::applications::{
    create_application, get_application, list_applications, list_candidate_applications,
    list_company_applications, list_referrer_applications, update_application_status,
};
use crate::handlers::auth::{login, me, signup};
use crate::handlers::companies::{create_company, get_company, list_companies, update_company};
use crate::handlers::jobs::{create_job, get_job, list_jobs, list_referrer_jobs, update_job};
use crate::handlers::profiles::{create_profile, update_profile, upload_resume};
use crate::handlers::{health, ready};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    ClientRateLimiter,
};
use crate::services::UPLOADS_PREFIX;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let auth_routes = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me));

    let profile_routes = Router::new()
        .route("/profiles", post(create_profile).put(update_profile))
        .route("/profiles/resume", post(upload_resume));

    let job_routes = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/:id", get(get_job).put(update_job))
        .route("/jobs/referrer/:referrer_id", get(list_referrer_jobs));

    let company_routes = Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route("/companies/:id", get(get_company).put(update_company));

    let application_routes = Router::new()
        .route(
            "/applications",
            get(list_applications).post(create_application),
        )
        .route("/applications/candidate", get(list_candidate_applications))
        .route("/applications/referrer", get(list_referrer_applications))
        .route("/applications/company", get(list_company_applications))
        .route("/applications/:id", get(get_application))
        .route("/applications/:id/status", put(update_application_status));

    let rate_limiter = Arc::new(ClientRateLimiter::new(
        state.config.rate_limit_rps,
        state.config.rate_limit_burst,
        state.config.trust_proxy_headers,
    ));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(profile_routes)
        .merge(job_routes)
        .merge(company_routes)
        .merge(application_routes)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    let uploads = ServeDir::new(state.resumes.dir());

    Router::new()
        .nest("/api", api_routes)
        .nest_service(UPLOADS_PREFIX, uploads)
        .merge(health_routes)
        .merge(metrics_routes)
        // Multipart bodies are bounded by RequestBodyLimitLayer instead of axum's 2MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
