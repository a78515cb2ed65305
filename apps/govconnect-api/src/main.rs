//! GovConnect API gateway
//!
//! Single entry point for the citizen-services front end:
//! - Assistant chat: free text in, acknowledgment plus destination route out
//! - Complaint flow: draft generation, placeholder refinement, relay
//!   submission, PDF export
//! - Thin proxies for schemes, forms, process tracking, and the locator

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod backend;
mod config;
mod error;
mod handlers;
mod models;
mod relay;
mod state;

use config::AppConfig;
use state::AppState;

fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Assistant
        .route("/api/chat", post(handlers::chat))
        .route("/api/chat/strings", get(handlers::chat_strings))
        // Complaint flow
        .route("/api/complaints/sectors", get(handlers::complaint_sectors))
        .route("/api/complaints/generate", post(handlers::generate_complaint))
        .route("/api/complaints/refine", post(handlers::refine_complaint))
        .route("/api/complaints/send", post(handlers::send_complaint))
        .route("/api/complaints/export", post(handlers::export_complaint))
        // Locator
        .route("/api/locator/reverse", get(handlers::reverse_geocode))
        // Backend proxies
        .route(
            "/api/schemes",
            get(handlers::list_schemes).post(handlers::query_schemes),
        )
        .route("/api/schemes/categories", get(handlers::scheme_categories))
        .route(
            "/api/schemes/check-eligibility",
            post(handlers::check_eligibility),
        )
        .route(
            "/api/schemes/readiness-score",
            post(handlers::readiness_score),
        )
        .route("/api/forms", get(handlers::list_forms))
        .route("/api/forms/assist", post(handlers::form_assist))
        .route("/api/forms/analyze-document", post(handlers::analyze_document))
        .route(
            "/api/forms/validate-document",
            post(handlers::validate_document),
        )
        .route("/api/files/upload", post(handlers::upload_file))
        .route("/api/process/track", post(handlers::track_process))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("govconnect_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing GovConnect API...");
    let config = AppConfig::from_env();
    let port = config.port;
    let state = Arc::new(AppState::new(config)?);

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting GovConnect API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
