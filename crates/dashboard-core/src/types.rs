use serde::{Deserialize, Serialize};

/// One tile of the quick-overview board (index, commodity, crypto).
///
/// Numeric fields are `Option` because the upstream emits `null` whenever a
/// series is missing or too short to compute a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub name: String,
    pub ticker: String,
    pub value: Option<f64>,
    pub delta1d: Option<f64>,
    pub mtd: Option<f64>,
    pub ytd: Option<f64>,
}

/// The quick-overview board as served by the upstream quotes endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBoard {
    pub as_of: String,
    pub items: Vec<QuoteItem>,
}

/// One watchlist row: price, deltas and a few fundamentals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub name: String,
    pub ticker: String,
    pub price: Option<f64>,
    pub delta1d: Option<f64>,
    pub mtd: Option<f64>,
    pub ytd: Option<f64>,
    #[serde(default)]
    pub currency: String,
    pub market_cap: Option<f64>,
    pub pe: Option<f64>,
    pub volume: Option<f64>,
    /// Set by the upstream on per-symbol failures; absent on healthy rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The watchlist as served by the upstream watchlist endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistBoard {
    pub as_of: String,
    pub items: Vec<WatchlistItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_board_wire_keys() {
        let json = r#"{
            "asOf": "2025-08-07",
            "items": [
                {"name": "DAX", "ticker": "^GDAXI", "value": 17842.3, "delta1d": -0.42, "mtd": 1.1, "ytd": null}
            ]
        }"#;

        let board: QuoteBoard = serde_json::from_str(json).unwrap();
        assert_eq!(board.as_of, "2025-08-07");
        assert_eq!(board.items[0].ticker, "^GDAXI");
        assert_eq!(board.items[0].ytd, None);

        let out = serde_json::to_value(&board).unwrap();
        assert!(out.get("asOf").is_some());
        assert!(out.get("as_of").is_none());
    }

    #[test]
    fn test_watchlist_wire_keys() {
        let json = r#"{
            "asOf": "2025-08-07",
            "items": [
                {"name": "Apple", "ticker": "AAPL", "price": 212.4, "delta1d": 0.3, "mtd": 2.0, "ytd": 11.5,
                 "currency": "USD", "marketCap": 3.2e12, "pe": 33.1, "volume": 51234000.0},
                {"name": "Broken", "ticker": "XXX", "price": null, "delta1d": null, "mtd": null, "ytd": null,
                 "currency": "", "marketCap": null, "pe": null, "volume": null, "error": "no_series_or_too_short"}
            ]
        }"#;

        let board: WatchlistBoard = serde_json::from_str(json).unwrap();
        assert_eq!(board.items[0].market_cap, Some(3.2e12));
        assert!(board.items[0].error.is_none());
        assert_eq!(board.items[1].error.as_deref(), Some("no_series_or_too_short"));

        // marketCap must round-trip in camelCase; error is omitted when None
        let out = serde_json::to_value(&board).unwrap();
        let healthy = &out["items"][0];
        assert!(healthy.get("marketCap").is_some());
        assert!(healthy.get("error").is_none());
    }
}
