//! FarmProfit market-price engine.
//!
//! Scrapes the real-time produce auction listing of the national
//! agricultural wholesale market site, normalizes the rows, and answers the
//! dashboard's questions in-process: per-corporation price statistics,
//! price-band histograms and the most profitable shipping destination.
//!
//! # Quick start
//!
//! ```no_run
//! use farmprofit::models::{SaleDate, SaleQuery};
//! use farmprofit::queries::StatsFilter;
//! use farmprofit::FarmProfit;
//!
//! let client = FarmProfit::builder().build();
//! let query = SaleQuery::all_varieties(SaleDate::parse("20240105").unwrap());
//! let snapshot = client.snapshot(&query).unwrap();
//!
//! let stats = snapshot.stats().aggregate(&StatsFilter::default());
//! let best = snapshot.recommend().best();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod models;
pub mod normalize;
pub mod queries;
pub mod samples;
pub mod scrape;
pub mod sequence;

#[cfg(feature = "async")]
pub use async_client::AsyncFarmProfit;
pub use error::{FarmProfitError, Result};
pub use fetch::MarketFetcher;
pub use scrape::{SanRealtimeTable, TableAdapter};
pub use sequence::{LatestSlot, Ticket};

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

use tracing::info;

use models::{AuctionRow, MarketRecord, MarketRow, SaleQuery};

// ---------------------------------------------------------------------------
// FarmProfitBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`FarmProfit`] client.
pub struct FarmProfitBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    adapter: Option<Box<dyn TableAdapter>>,
}

impl Default for FarmProfitBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            user_agent: None,
            adapter: None,
        }
    }
}

impl FarmProfitBuilder {
    /// Point the client at a different listing URL (mirror or test server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the browser `User-Agent` sent upstream.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Use a different table adapter. Defaults to [`SanRealtimeTable`].
    pub fn adapter(mut self, adapter: impl TableAdapter + 'static) -> Self {
        self.adapter = Some(Box::new(adapter));
        self
    }

    /// Build the client. No network traffic happens until the first fetch.
    pub fn build(self) -> FarmProfit {
        FarmProfit {
            fetcher: RefCell::new(MarketFetcher::new(self.base_url, self.timeout, self.user_agent)),
            adapter: self.adapter.unwrap_or_else(|| Box::new(SanRealtimeTable)),
        }
    }
}

// ---------------------------------------------------------------------------
// FarmProfit
// ---------------------------------------------------------------------------

/// Entry point: fetches and scrapes auction listings.
///
/// Created via [`FarmProfit::builder()`].
pub struct FarmProfit {
    fetcher: RefCell<MarketFetcher>,
    adapter: Box<dyn TableAdapter>,
}

impl FarmProfit {
    pub fn builder() -> FarmProfitBuilder {
        FarmProfitBuilder::default()
    }

    /// Fetch the listing for `query` and scrape its rows.
    pub fn fetch_rows(&self, query: &SaleQuery) -> Result<Vec<AuctionRow>> {
        let html = self.fetcher.borrow_mut().fetch_html(query)?;
        let rows = self.adapter.parse(&html)?;
        info!(
            sale_date = %query.sale_date,
            adapter = self.adapter.name(),
            rows = rows.len(),
            "scraped auction rows"
        );
        Ok(rows)
    }

    /// Fetch the listing for `query` and load it into a snapshot.
    pub fn snapshot(&self, query: &SaleQuery) -> Result<MarketSnapshot> {
        let rows = self.fetch_rows(query)?;
        Ok(MarketSnapshot::from_auction_rows(Some(query.clone()), rows))
    }

    /// Scrape already-downloaded listing HTML.
    pub fn parse_html(&self, html: &str) -> Result<Vec<AuctionRow>> {
        self.adapter.parse(html)
    }

    pub fn base_url(&self) -> String {
        self.fetcher.borrow().base_url.clone()
    }

    /// Consume the client and release the HTTP connection pool.
    pub fn close(self) {
        self.fetcher.borrow_mut().close();
    }
}

impl fmt::Display for FarmProfit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FarmProfit(base_url={}, adapter={})",
            self.fetcher.borrow().base_url,
            self.adapter.name()
        )
    }
}

// ---------------------------------------------------------------------------
// MarketSnapshot
// ---------------------------------------------------------------------------

/// Rows of one fetch, held in memory and queried on demand.
///
/// Every query recomputes from these rows; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    query: Option<SaleQuery>,
    rows: Vec<AuctionRow>,
    records: Vec<MarketRecord>,
    market_rows: Vec<MarketRow>,
}

impl MarketSnapshot {
    pub fn from_auction_rows(query: Option<SaleQuery>, rows: Vec<AuctionRow>) -> Self {
        let records = normalize::records_from_auctions(&rows);
        let market_rows = normalize::market_rows_from_auctions(&rows);
        Self {
            query,
            rows,
            records,
            market_rows,
        }
    }

    /// Snapshot from a loosely-shaped JSON response (see [`normalize`]).
    pub fn from_json(data: &serde_json::Value) -> Self {
        Self {
            query: None,
            rows: Vec::new(),
            records: normalize::parse_market_records(data),
            market_rows: normalize::parse_market_rows(data),
        }
    }

    /// Snapshot over price-table rows only, such as [`samples`].
    pub fn from_market_rows(market_rows: Vec<MarketRow>) -> Self {
        let records = market_rows
            .iter()
            .map(|r| MarketRecord {
                market: r.market_name.clone(),
                corporation: r.corporation_name.clone(),
                variety: config::DEFAULT_VARIETY.to_string(),
                origin: None,
                volume_kg: r.quantity,
                price_won: r.price_special,
            })
            .collect();
        Self {
            query: None,
            rows: Vec::new(),
            records,
            market_rows,
        }
    }

    pub fn query(&self) -> Option<&SaleQuery> {
        self.query.as_ref()
    }

    /// Scraped rows in upstream shape (empty for JSON and sample snapshots).
    pub fn rows(&self) -> &[AuctionRow] {
        &self.rows
    }

    pub fn records(&self) -> &[MarketRecord] {
        &self.records
    }

    pub fn market_rows(&self) -> &[MarketRow] {
        &self.market_rows
    }

    /// Price-table rows, or the crop's samples when there are none.
    pub fn market_rows_or_samples(&self, crop_slug: &str) -> Vec<MarketRow> {
        samples::rows_or_samples(self.market_rows.clone(), crop_slug)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // -- Query accessors ---------------------------------------------------

    pub fn stats(&self) -> queries::StatsQuery<'_> {
        queries::StatsQuery::new(&self.records)
    }

    pub fn distribution(&self) -> queries::DistributionQuery<'_> {
        queries::DistributionQuery::new(&self.records)
    }

    pub fn recommend(&self) -> queries::RecommendQuery<'_> {
        queries::RecommendQuery::new(&self.market_rows)
    }
}
