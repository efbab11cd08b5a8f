use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use std::env;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Base URL of the upstream quote/watchlist API.
    pub upstream_base_url: String,
    /// Zone in which exchange hours are displayed to the user.
    pub viewer_zone: Tz,
    pub quote_refresh_seconds: u64,
    /// CORS origin; `*` allows any.
    pub allowed_origin: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let viewer_tz = env::var("VIEWER_TZ").unwrap_or_else(|_| "Europe/Berlin".to_string());
        let viewer_zone: Tz = viewer_tz
            .parse()
            .map_err(|_| anyhow!("VIEWER_TZ '{viewer_tz}' is not a known IANA time zone"))?;

        let quote_refresh_seconds: u64 = env::var("QUOTE_REFRESH_SECONDS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("QUOTE_REFRESH_SECONDS must be an integer")?;
        if quote_refresh_seconds == 0 {
            return Err(anyhow!("QUOTE_REFRESH_SECONDS must be at least 1"));
        }

        Ok(Self {
            bind_addr: env::var("DASHBOARD_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .context("UPSTREAM_BASE_URL must be set (base URL of the quote API)")?,
            viewer_zone,
            quote_refresh_seconds,
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string()),
        })
    }
}
