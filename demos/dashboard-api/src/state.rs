use farmprofit::{AsyncFarmProfit, LatestSlot, MarketSnapshot};

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Dispatches blocking fetches to the blocking thread pool.
    pub client: AsyncFarmProfit,

    /// Snapshot of the most recently selected sale date. Responses for
    /// superseded selections are dropped instead of overwriting it.
    pub board: LatestSlot<MarketSnapshot>,
}
