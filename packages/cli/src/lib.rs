// ABOUTME: Server assembly for RealWorldEd
// ABOUTME: Builds shared state from config, layers the router, and runs the HTTP server

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, Method},
    Router,
};
use realworlded_agents::AgentSet;
use realworlded_ai::GeminiService;
use realworlded_api::{create_api_router, AppState};
use realworlded_security::TokenIssuer;
use realworlded_storage::DbState;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod api;
pub mod config;
pub mod demo;
pub mod middleware;


use config::Config;

/// Shared handler state built from config over an already-open database
pub fn build_state(config: &Config, db: DbState) -> anyhow::Result<AppState> {
    let gemini = GeminiService::new(config.gemini_api_key.clone(), config.gemini_model.clone())
        .context("Failed to build Gemini client")?;
    let agents = AgentSet::new(Arc::new(gemini)).context("Failed to load agent personas")?;
    let tokens = TokenIssuer::new(&config.secret_key, config.access_token_expire_minutes);

    Ok(AppState::new(db, tokens, agents))
}

fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_header_values()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Full application router with service routes, API routes, and middleware
pub fn build_app(config: &Config, state: AppState) -> Router {
    Router::new()
        .merge(api::create_service_router())
        .merge(create_api_router())
        .with_state(state)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::create_panic_handler())
}

fn log_startup_warnings(config: &Config) {
    if config.uses_default_secret() {
        warn!("SECRET_KEY is not set - using the development default. Set SECRET_KEY in production.");
    }
    if config.demo_mode() {
        warn!("GEMINI_API_KEY is not set - running in demo mode with canned agent replies");
    }
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    log_startup_warnings(&config);

    let db = DbState::init(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    let state = build_state(&config, db)?;
    let app = build_app(&config, state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("RealWorldEd API listening on http://{}", addr);
    info!("CORS origins: {}", config.cors_origins.join(", "));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
