use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}
