//! School Site API - marketing and lead-capture backend
//!
//! Public intake layer: unauthenticated enquiry and campus-visit
//! submissions, plus public reads of banners, notices, and student
//! achievers. Admin management layer: session-gated reads, creates,
//! deletes, status transitions, and asset upload delegation.

mod assets;
mod auth;
mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;
mod validate;

use crate::assets::AssetClient;
use crate::config::Settings;
use crate::db::DocStore;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting School Site API...");

    let settings = Settings::load()?;
    info!("Configuration loaded successfully");

    let pool = db::create_pool(&settings.database)
        .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;

    let store = DocStore::new(pool);
    store
        .init_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize document store: {}", e))?;

    let assets = AssetClient::new(&settings.assets);
    let state = Arc::new(AppState::new(store, assets, settings.jwt_secret.clone()));

    let app = create_router(state, &settings);

    let addr = SocketAddr::from((settings.server.host, settings.server.port));
    info!("Server listening on http://{}", addr);
    info!("");
    info!("API Endpoints:");
    info!("   --- Admin accounts ---");
    info!("   POST   /admin/register           - Register admin account");
    info!("   POST   /admin/login              - Login, returns session token");
    info!("");
    info!("   --- Public site ---");
    info!("   GET    /banners                  - Active banners inside their window");
    info!("   GET    /notices                  - Notices, date descending");
    info!("   GET    /achievers                - Student achievers, display order");
    info!("   POST   /admission-enquiries      - Submit admission enquiry");
    info!("   POST   /contact-enquiries        - Submit contact enquiry");
    info!("   POST   /fees-enquiries           - Submit fees enquiry");
    info!("   POST   /campus-visits            - Request a campus visit");
    info!("");
    info!("   --- Admin management (session required) ---");
    info!("   GET    /banners/all              - All banners");
    info!("   GET    /<enquiries|visits>       - List submissions");
    info!("   DELETE /<resource>/:id           - Delete a record");
    info!("   PATCH  /<enquiries|visits>/:id/status - Move lifecycle status");
    info!("   POST   /banners|notices|achievers - Create content");
    info!("   POST   /upload                   - Upload image/pdf to asset host");
    info!("");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,school_site_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
