// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RCM-Lite Server - maintenance strategy and FMECA API for BIM viewers.
//!
//! Serves the maintenance strategy sheet as colorize instructions and the
//! FMECA sheet as a searchable failure-mode table. Both sheets are read at
//! startup from `SHEET_BASE_URL` (a web origin or a local directory).
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check with sheet status
//! - `GET /api/v1/maintenance/colors` - Colorize instructions and legend
//! - `GET /api/v1/maintenance/tasks/:guid` - Tasks of one component
//! - `GET /api/v1/fmeca/search?q=` - Failure modes by GUID substring
//! - `POST /api/v1/fmeca/strategy` - Classify a rating triple
//! - `POST /api/v1/sheets/reload` - Reload both sheets

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod services;

use config::Config;
use services::SheetStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<SheetStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug,rcm_lite_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        sheet_base_url = %config.sheet_base_url,
        maintenance_sheet = %config.maintenance_sheet_path,
        fmeca_sheet = %config.fmeca_sheet_path,
        label_style = ?config.label_style,
        "Starting RCM-Lite Server"
    );

    let sheets = Arc::new(SheetStore::new(&config)?);
    // A missing sheet is not fatal: endpoints answer 503 until a reload succeeds.
    sheets.reload_all().await;

    let state = AppState {
        sheets,
        config: Arc::new(config.clone()),
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Build the router with all endpoints and middleware.
fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Maintenance coloring
        .route("/api/v1/maintenance/colors", get(routes::maintenance::colors))
        .route("/api/v1/maintenance/tasks/:guid", get(routes::maintenance::tasks))
        // FMECA
        .route("/api/v1/fmeca/search", get(routes::fmeca::search))
        .route("/api/v1/fmeca/strategy", post(routes::fmeca::strategy))
        // Sheets
        .route("/api/v1/sheets/reload", post(routes::sheets::reload))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// `*` allows any origin; otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

#[cfg(test)]
impl AppState {
    /// State whose sheets live in a directory that does not exist.
    pub fn for_tests() -> Self {
        let config = Config {
            port: 0,
            sheet_base_url: "/nonexistent/rcm-lite".into(),
            maintenance_sheet_path: "/maintenance_strategy.xlsx".into(),
            fmeca_sheet_path: "/FMECA.xlsx".into(),
            request_timeout_secs: 5,
            label_style: Default::default(),
            cors_origins: vec!["*".into()],
        };
        let sheets = SheetStore::new(&config).expect("test client");
        Self {
            sheets: Arc::new(sheets),
            config: Arc::new(config),
        }
    }
}
