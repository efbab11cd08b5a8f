use std::sync::Arc;
use std::time::Duration;

use dashboard_core::{QuoteBoard, WatchlistBoard};
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;

use crate::AppState;

/// Latest good snapshots of the upstream boards.
///
/// The refresh task is the only writer; handlers only read. A failed refresh
/// leaves the previous snapshot in place, so clients keep getting stale data
/// rather than errors once at least one fetch has succeeded.
#[derive(Clone, Default)]
pub struct BoardCache {
    quotes: Arc<RwLock<Option<QuoteBoard>>>,
    watchlist: Arc<RwLock<Option<WatchlistBoard>>>,
}

impl BoardCache {
    pub async fn quotes(&self) -> Option<QuoteBoard> {
        self.quotes.read().await.clone()
    }

    pub async fn watchlist(&self) -> Option<WatchlistBoard> {
        self.watchlist.read().await.clone()
    }

    pub async fn store_quotes(&self, board: QuoteBoard) {
        *self.quotes.write().await = Some(board);
    }

    pub async fn store_watchlist(&self, board: WatchlistBoard) {
        *self.watchlist.write().await = Some(board);
    }
}

/// Periodic upstream poll. The first tick fires immediately so the cache is
/// warm before the first dashboard request arrives.
pub async fn run(state: AppState, every: Duration) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        refresh_once(&state).await;
    }
}

pub(crate) async fn refresh_once(state: &AppState) {
    match state.source.quotes().await {
        Ok(board) => {
            tracing::debug!("Quote board refreshed: {} items as of {}", board.items.len(), board.as_of);
            state.cache.store_quotes(board).await;
        }
        Err(e) => tracing::warn!("Quote refresh failed, keeping previous snapshot: {}", e),
    }

    match state.source.watchlist().await {
        Ok(board) => {
            tracing::debug!("Watchlist refreshed: {} items as of {}", board.items.len(), board.as_of);
            state.cache.store_watchlist(board).await;
        }
        Err(e) => tracing::warn!("Watchlist refresh failed, keeping previous snapshot: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_quotes, sample_watchlist, state_with};
    use async_trait::async_trait;
    use dashboard_core::{DashboardError, QuoteSource};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlakySource {
        fail: AtomicBool,
    }

    #[async_trait]
    impl QuoteSource for FlakySource {
        async fn quotes(&self) -> Result<QuoteBoard, DashboardError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(DashboardError::UpstreamError("HTTP 500".to_string()))
            } else {
                Ok(sample_quotes())
            }
        }

        async fn watchlist(&self) -> Result<WatchlistBoard, DashboardError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(DashboardError::UpstreamError("HTTP 500".to_string()))
            } else {
                Ok(sample_watchlist())
            }
        }
    }

    #[tokio::test]
    async fn test_refresh_populates_cache() {
        let source = Arc::new(FlakySource { fail: AtomicBool::new(false) });
        let state = state_with(source);

        assert!(state.cache.quotes().await.is_none());
        refresh_once(&state).await;
        assert!(state.cache.quotes().await.is_some());
        assert!(state.cache.watchlist().await.is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let source = Arc::new(FlakySource { fail: AtomicBool::new(false) });
        let state = state_with(source.clone());

        refresh_once(&state).await;
        let before = state.cache.quotes().await.unwrap();

        source.fail.store(true, Ordering::SeqCst);
        refresh_once(&state).await;

        let after = state.cache.quotes().await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_cold_cache_stays_empty_on_failure() {
        let source = Arc::new(FlakySource { fail: AtomicBool::new(true) });
        let state = state_with(source);

        refresh_once(&state).await;
        assert!(state.cache.quotes().await.is_none());
        assert!(state.cache.watchlist().await.is_none());
    }
}
