use std::sync::Arc;

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use service::{identity::PlatformIdentity, FsChecker};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// Initialize logging via shared common utils
fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the router for a loaded config, using the real process identity.
pub fn build_app(cfg: &AppConfig) -> Router {
    let checker = FsChecker::new(cfg.fscheck.clone(), PlatformIdentity);
    let state = AppState { checker: Arc::new(checker) };
    routes::build_router(state, build_cors())
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> Result<(), StartupError> {
    dotenv().ok();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    init_logging(cfg.log.format);

    common::env::check_target_dir(&cfg.fscheck.config_dir).await;

    let app = build_app(&cfg);

    let addr = cfg.server.bind_addr();
    info!(%addr, route = %cfg.fscheck.route, dir = %cfg.fscheck.config_dir.display(), "starting fscheck server");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    axum::serve(listener, app).await.map_err(StartupError::Serve)?;
    Ok(())
}
