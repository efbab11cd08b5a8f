use async_trait::async_trait;

use crate::{DashboardError, QuoteBoard, WatchlistBoard};

/// Trait for providers of quote-board and watchlist data.
///
/// The production implementation talks HTTP to the upstream JSON API; tests
/// substitute a canned source.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quotes(&self) -> Result<QuoteBoard, DashboardError>;
    async fn watchlist(&self) -> Result<WatchlistBoard, DashboardError>;
}
