//! Dashboard API server.
//!
//! Serves the market-session status computed by `market-hours` plus the
//! cached quote board and watchlist fetched from the upstream JSON API.

pub mod config;
mod health_routes;
mod market_routes;
mod quote_routes;
mod refresh;
mod request_id;
mod watchlist_routes;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::{middleware, Router};
use chrono_tz::Tz;
use dashboard_core::QuoteSource;
use market_hours::{default_markets, MarketRegistry};
use quote_client::UpstreamClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::ServerConfig;
pub use refresh::BoardCache;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MarketRegistry>,
    pub viewer_zone: Tz,
    pub source: Arc<dyn QuoteSource>,
    pub cache: BoardCache,
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origin == "*" {
        return cors.allow_origin(Any);
    }
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                "ALLOWED_ORIGIN '{}' is not a valid header value, allowing any origin",
                allowed_origin
            );
            cors.allow_origin(Any)
        }
    }
}

fn router(state: AppState, allowed_origin: &str) -> Router {
    Router::new()
        .merge(market_routes::market_routes())
        .merge(quote_routes::quote_routes())
        .merge(watchlist_routes::watchlist_routes())
        .merge(health_routes::health_routes())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run_server() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    let registry = MarketRegistry::new(default_markets())?;
    tracing::info!(
        "Market registry loaded: {} exchanges, viewer zone {}",
        registry.len(),
        config.viewer_zone.name()
    );

    let state = AppState {
        registry: Arc::new(registry),
        viewer_zone: config.viewer_zone,
        source: Arc::new(UpstreamClient::new(config.upstream_base_url.clone())),
        cache: BoardCache::default(),
    };

    tokio::spawn(refresh::run(
        state.clone(),
        Duration::from_secs(config.quote_refresh_seconds),
    ));
    tracing::info!(
        "Upstream {} polled every {}s",
        config.upstream_base_url,
        config.quote_refresh_seconds
    );

    let app = router(state, &config.allowed_origin);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Dashboard API listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
