use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::format;

use super::market::MarketRow;

// ---------------------------------------------------------------------------
// ViewMode — How records are grouped within a variety
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Group by `"market corporation"`.
    #[default]
    #[serde(rename = "CORP", alias = "corp")]
    Corporation,
    /// Group by the first token of the origin.
    #[serde(rename = "ORIGIN", alias = "origin")]
    Origin,
}

// ---------------------------------------------------------------------------
// AggregatedGroup — Running totals for one (variety, group key)
// ---------------------------------------------------------------------------

/// Accumulated volume and price extremes for one group.
///
/// The average is derived on read. `min_price`/`max_price` start at +∞/−∞
/// and stay there until a record is added.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedGroup {
    pub key: String,
    pub name: String,
    pub market: String,
    pub total_amount: f64,
    pub total_volume: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl AggregatedGroup {
    pub fn new(key: impl Into<String>, name: impl Into<String>, market: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            market: market.into(),
            total_amount: 0.0,
            total_volume: 0.0,
            min_price: f64::INFINITY,
            max_price: f64::NEG_INFINITY,
        }
    }

    pub fn add(&mut self, price: f64, volume: f64) {
        self.total_amount += price * volume;
        self.total_volume += volume;
        self.min_price = self.min_price.min(price);
        self.max_price = self.max_price.max(price);
    }

    /// Volume-weighted average price, 0 when no volume was recorded.
    pub fn average(&self) -> f64 {
        if self.total_volume > 0.0 {
            self.total_amount / self.total_volume
        } else {
            0.0
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.min_price.is_finite().then_some(self.min_price)
    }

    pub fn max(&self) -> Option<f64> {
        self.max_price.is_finite().then_some(self.max_price)
    }

    pub fn min_display(&self) -> String {
        format::price_or_dash(self.min())
    }

    pub fn max_display(&self) -> String {
        format::price_or_dash(self.max())
    }
}

impl Serialize for AggregatedGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("AggregatedGroup", 8)?;
        s.serialize_field("key", &self.key)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("market", &self.market)?;
        s.serialize_field("totalAmount", &self.total_amount)?;
        s.serialize_field("totalVolume", &self.total_volume)?;
        s.serialize_field("averagePrice", &self.average().round())?;
        s.serialize_field("minPrice", &self.min())?;
        s.serialize_field("maxPrice", &self.max())?;
        s.end()
    }
}

// ---------------------------------------------------------------------------
// VarietyStats — Ranked groups for one variety
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarietyStats {
    pub variety: String,
    pub label: &'static str,
    pub groups: Vec<AggregatedGroup>,
}

// ---------------------------------------------------------------------------
// PriceDistribution — Volume histogram for one corporation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBucket {
    pub label: String,
    pub volume_kg: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDistribution {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub total_kg: f64,
    pub buckets: Vec<PriceBucket>,
}

/// Preview bars of one aggregated group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewBars {
    pub market: String,
    pub corporation: String,
    pub bars: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Recommendation — Best shipping destination by net profit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub best: MarketRow,
    pub best_profit: f64,
    pub compare_to: Option<MarketRow>,
    pub profit_diff: f64,
}

impl Recommendation {
    /// One-sentence explanation shown under the recommendation.
    pub fn summary(&self, crop_name: &str) -> String {
        match &self.compare_to {
            Some(other) if self.profit_diff > 0.0 => format!(
                "오늘 {}에 출하하면 {}보다 약 {}의 수익이 더 발생합니다.",
                self.best.display_name(),
                other.display_name(),
                format::won(self.profit_diff),
            ),
            _ => format!(
                "현재 데이터 기준, {}이 {} 출하 시 최적의 선택입니다.",
                self.best.display_name(),
                crop_name,
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// GroupPick — Best aggregated group by average price
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPick {
    pub variety: String,
    pub best: AggregatedGroup,
    pub runner_up: Option<AggregatedGroup>,
    /// Average price difference per kg versus the runner-up.
    pub price_gap: f64,
    /// `price_gap` applied to the best group's volume.
    pub profit_gap: f64,
}
