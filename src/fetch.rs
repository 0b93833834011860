//! Upstream page fetcher.
//!
//! Issues one GET per call against the real-time auction listing. There is
//! no retry and no caching: every call goes to the network.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::config;
use crate::error::{FarmProfitError, Result};
use crate::models::SaleQuery;

/// Fetches auction listing pages from the upstream market-data site.
pub struct MarketFetcher {
    /// Listing endpoint; overridable for tests and mirrors.
    pub base_url: String,
    timeout: Duration,
    user_agent: String,
    client: Option<Client>,
}

impl MarketFetcher {
    pub fn new(base_url: Option<String>, timeout: Duration, user_agent: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| config::UPSTREAM_URL.to_string()),
            timeout,
            user_agent: user_agent.unwrap_or_else(|| config::USER_AGENT.to_string()),
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .user_agent(self.user_agent.clone())
                .build()?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| FarmProfitError::InvalidArgument("HTTP client unavailable".into()))
    }

    /// Full listing URL for a query, with the fixed category codes and page size.
    pub fn request_url(&self, query: &SaleQuery) -> Result<Url> {
        let sale_date = query.sale_date.to_string();
        let page_size = config::PAGE_SIZE.to_string();
        let params: [(&str, &str); 10] = [
            ("pageNo", "1"),
            ("saledate", &sale_date),
            ("whsalCd", ""),
            ("cmpCd", ""),
            ("sanCd", ""),
            ("smallCdSearch", ""),
            ("largeCd", config::LARGE_CD),
            ("midCd", config::MID_CD),
            ("smallCd", &query.small_cd),
            ("pageSize", &page_size),
        ];
        Url::parse_with_params(&self.base_url, params.iter()).map_err(|e| {
            FarmProfitError::InvalidArgument(format!("Invalid upstream URL {}: {}", self.base_url, e))
        })
    }

    /// Download the listing page for a query and return its HTML.
    pub fn fetch_html(&mut self, query: &SaleQuery) -> Result<String> {
        let url = self.request_url(query)?;
        info!(sale_date = %query.sale_date, small_cd = %query.small_cd, "fetching auction listing");

        let started = Instant::now();
        let client = self.client()?.clone();
        let resp = client
            .get(url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, %url, "upstream returned an error status");
            return Err(FarmProfitError::Upstream(format!(
                "market listing returned status {}",
                status
            )));
        }

        let body = resp.text()?;
        debug!(
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "auction listing downloaded"
        );
        Ok(body)
    }

    /// Drop the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}
