//! Async wrapper around [`FarmProfit`] for use in async runtimes (Tokio, etc.).
//!
//! The underlying client uses blocking HTTP, so every operation is sent to
//! the blocking thread pool via [`tokio::task::spawn_blocking`].
//!
//! # Example
//!
//! ```no_run
//! use farmprofit::models::{SaleDate, SaleQuery};
//! use farmprofit::AsyncFarmProfit;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let client = AsyncFarmProfit::builder().build();
//!     let query = SaleQuery::all_varieties(SaleDate::today());
//!     let rows = client.fetch_rows(query).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::info;

use crate::error::{FarmProfitError, Result};
use crate::models::{AuctionRow, SaleQuery};
use crate::sequence::LatestSlot;
use crate::{config, FarmProfit, MarketSnapshot};

// ---------------------------------------------------------------------------
// AsyncFarmProfitBuilder
// ---------------------------------------------------------------------------

pub struct AsyncFarmProfitBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for AsyncFarmProfitBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl AsyncFarmProfitBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the async client. The HTTP client itself is created lazily on
    /// the blocking pool during the first fetch.
    pub fn build(self) -> AsyncFarmProfit {
        let mut builder = FarmProfit::builder().timeout(self.timeout);
        if let Some(url) = self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }
        AsyncFarmProfit {
            inner: Arc::new(Mutex::new(builder.build())),
        }
    }
}

// ---------------------------------------------------------------------------
// AsyncFarmProfit
// ---------------------------------------------------------------------------

/// Async wrapper around [`FarmProfit`].
///
/// The inner client sits behind a [`Mutex`] since it uses `RefCell`
/// internally; concurrent fetches are serialized.
#[derive(Clone)]
pub struct AsyncFarmProfit {
    inner: Arc<Mutex<FarmProfit>>,
}

impl AsyncFarmProfit {
    pub fn builder() -> AsyncFarmProfitBuilder {
        AsyncFarmProfitBuilder::default()
    }

    /// Run a sync client operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FarmProfit) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = client
                .lock()
                .map_err(|_| FarmProfitError::InvalidArgument("client lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| FarmProfitError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn fetch_rows(&self, query: SaleQuery) -> Result<Vec<AuctionRow>> {
        self.run(move |c| c.fetch_rows(&query)).await
    }

    pub async fn snapshot(&self, query: SaleQuery) -> Result<MarketSnapshot> {
        self.run(move |c| c.snapshot(&query)).await
    }

    /// Fetch a snapshot and store it in `slot` unless a newer fetch was
    /// issued meanwhile.
    ///
    /// Returns the row count of this fetch when it was applied, `None` when
    /// it was superseded.
    pub async fn refresh_into(
        &self,
        slot: &LatestSlot<MarketSnapshot>,
        query: SaleQuery,
    ) -> Result<Option<usize>> {
        let ticket = slot.issue();
        let sale_date = query.sale_date;
        let snapshot = self.snapshot(query).await?;
        let rows = snapshot.rows().len();
        let applied = slot.apply(ticket, snapshot);
        info!(%sale_date, ticket = ticket.seq(), applied, rows, "snapshot refresh finished");
        Ok(applied.then_some(rows))
    }

    /// Release the client on the blocking pool, where dropping a blocking
    /// HTTP client is allowed.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| FarmProfitError::InvalidArgument(format!("Task join error: {e}")))
    }
}
