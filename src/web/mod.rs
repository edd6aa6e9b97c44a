mod error;
mod extractors;
mod handlers;
pub mod navigation;
mod routes;
pub mod security;
mod state;

pub use extractors::{LOCALE_COOKIE, SESSION_COOKIE};
pub use state::AppState;

use crate::services::auth;
use crate::{Config, Database};
use anyhow::Result;
use axum::middleware;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// The full application router with its middleware stack.
pub fn app(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let assets = ServeDir::new(&state.config.assets.dir);

    Router::new()
        .merge(routes::page_routes())
        .merge(routes::account_routes())
        .merge(routes::api_routes())
        .merge(routes::seo_routes())
        .nest_service("/static", assets)
        .fallback(handlers::pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(CompressionLayer::new())
                .layer(middleware::from_fn(security::apply_security_headers)),
        )
        .with_state(state)
}

pub async fn serve(config: Config, db: Database, addr: &str) -> Result<()> {
    let state = Arc::new(AppState::new(config, db.clone())?);

    let cleanup_db = db.clone();
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            match auth::cleanup_expired_sessions(&cleanup_db) {
                Ok(removed) if removed > 0 => {
                    tracing::info!("Session cleanup: {} expired session(s) removed", removed)
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Session cleanup failed: {:#}", e),
            }
            cleanup_state.rate_limiter.cleanup();
        }
    });

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
