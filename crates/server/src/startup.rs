use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Wire the store and dispatcher from configuration.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let data_dir = common::env::data_dir_of(&cfg.storage.path);
    runtime::ensure_env(&cfg.server.frontend_dir, &data_dir).await?;

    let store = runtime::build_store(&cfg.storage).map_err(|e| StartupError::Runtime(e.to_string()))?;
    let dispatcher =
        runtime::build_dispatcher(store.clone(), &cfg.email).map_err(|e| StartupError::Runtime(e.to_string()))?;
    Ok(ServerState { store, dispatcher })
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors(), &cfg.server.frontend_dir);

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = ?cfg.storage.backend, "starting camp admin server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
