//! Route definitions and router setup
//!
//! Configures all API routes and middleware. Each resource is an
//! independent instantiation of the generic handlers in
//! [`resource`]; the public content lists with custom ordering live in
//! [`content`].

mod admin;
mod content;
mod resource;
mod upload;

use crate::config::Settings;
use crate::models::{
    AdmissionEnquiry, Banner, CampusVisit, ContactEnquiry, FeesEnquiry, Notice, StudentAchiever,
};
use crate::state::SharedState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{delete, get, patch, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Multipart overhead on top of the 10MB PDF ceiling; the per-kind size
/// checks in the upload handler enforce the real limits.
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    let cors = build_cors_layer(settings);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Admin accounts
        .route("/admin/register", post(admin::register))
        .route("/admin/login", post(admin::login))
        // Student achievers
        .route(
            "/achievers",
            get(content::list_public_achievers).post(resource::create_admin::<StudentAchiever>),
        )
        .route("/achievers/{id}", delete(resource::delete_by_id::<StudentAchiever>))
        // Banners
        .route(
            "/banners",
            get(content::list_public_banners).post(resource::create_admin::<Banner>),
        )
        .route("/banners/all", get(content::list_all_banners))
        .route("/banners/{id}", delete(resource::delete_by_id::<Banner>))
        // Notices
        .route(
            "/notices",
            get(content::list_public_notices).post(resource::create_admin::<Notice>),
        )
        .route("/notices/{id}", delete(resource::delete_by_id::<Notice>))
        // Admission enquiries
        .route(
            "/admission-enquiries",
            get(resource::list_admin::<AdmissionEnquiry>).post(resource::create::<AdmissionEnquiry>),
        )
        .route(
            "/admission-enquiries/{id}",
            delete(resource::delete_by_id::<AdmissionEnquiry>),
        )
        .route(
            "/admission-enquiries/{id}/status",
            patch(resource::update_status::<AdmissionEnquiry>),
        )
        // Contact enquiries
        .route(
            "/contact-enquiries",
            get(resource::list_admin::<ContactEnquiry>).post(resource::create::<ContactEnquiry>),
        )
        .route(
            "/contact-enquiries/{id}",
            delete(resource::delete_by_id::<ContactEnquiry>),
        )
        .route(
            "/contact-enquiries/{id}/status",
            patch(resource::update_status::<ContactEnquiry>),
        )
        // Fees enquiries
        .route(
            "/fees-enquiries",
            get(resource::list_admin::<FeesEnquiry>).post(resource::create::<FeesEnquiry>),
        )
        .route(
            "/fees-enquiries/{id}",
            delete(resource::delete_by_id::<FeesEnquiry>),
        )
        .route(
            "/fees-enquiries/{id}/status",
            patch(resource::update_status::<FeesEnquiry>),
        )
        // Campus visits
        .route(
            "/campus-visits",
            get(resource::list_admin::<CampusVisit>).post(resource::create::<CampusVisit>),
        )
        .route(
            "/campus-visits/{id}",
            delete(resource::delete_by_id::<CampusVisit>),
        )
        .route(
            "/campus-visits/{id}/status",
            patch(resource::update_status::<CampusVisit>),
        )
        // Asset upload delegation
        .route("/upload", post(upload::upload))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<_> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    }
}

/// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "success": true,
        "message": "Server is running fine.",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
