use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_VARIETY;
use crate::normalize::to_number;

use super::market::{MarketRecord, MarketRow};

// ---------------------------------------------------------------------------
// AuctionRow — One scraped row of the real-time auction table
// ---------------------------------------------------------------------------

/// A single auction result as scraped from the upstream table.
///
/// `volume` is kept as the upstream text; `price` is the parsed winning bid in won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionRow {
    pub date: String,
    pub time: String,
    pub market: String,
    pub company: String,
    pub variety: String,
    pub unit: String,
    pub volume: String,
    pub price: u64,
}

impl From<&AuctionRow> for MarketRecord {
    fn from(row: &AuctionRow) -> Self {
        let variety = row.variety.trim();
        MarketRecord {
            market: row.market.clone(),
            corporation: row.company.clone(),
            variety: if variety.is_empty() {
                DEFAULT_VARIETY.to_string()
            } else {
                variety.to_string()
            },
            origin: None,
            volume_kg: to_number(&serde_json::Value::from(row.volume.as_str())),
            price_won: row.price as f64,
        }
    }
}

impl From<&AuctionRow> for MarketRow {
    fn from(row: &AuctionRow) -> Self {
        let price = row.price as f64;
        MarketRow {
            market_name: dash_if_empty(&row.market),
            corporation_name: dash_if_empty(&row.company),
            price_special: price,
            price_regular: price,
            quantity: to_number(&serde_json::Value::from(row.volume.as_str())),
            transport_cost: 0.0,
            fee: 0.0,
        }
    }
}

fn dash_if_empty(s: &str) -> String {
    let t = s.trim();
    if t.is_empty() {
        "-".to_string()
    } else {
        t.to_string()
    }
}
