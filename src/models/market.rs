use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MarketRecord — Normalized auction record used by the aggregator
// ---------------------------------------------------------------------------

/// An auction record after normalization.
///
/// `volume_kg` and `price_won` are never negative; unparseable input becomes 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    pub market: String,
    pub corporation: String,
    pub variety: String,
    pub origin: Option<String>,
    pub volume_kg: f64,
    pub price_won: f64,
}

impl MarketRecord {
    /// Two-character region prefix of the market name (e.g. `진주` for `진주공판장`).
    pub fn region(&self) -> String {
        self.market.chars().take(2).collect()
    }
}

// ---------------------------------------------------------------------------
// MarketRow — Per-corporation price row with shipping costs
// ---------------------------------------------------------------------------

/// One market/corporation quote as shown in the price table.
///
/// Prices are won per kg, `quantity` is kg brought to market, costs are won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRow {
    pub market_name: String,
    pub corporation_name: String,
    pub price_special: f64,
    pub price_regular: f64,
    pub quantity: f64,
    pub transport_cost: f64,
    pub fee: f64,
}

impl MarketRow {
    /// Net profit: `price_special × quantity − (transport_cost + fee)`.
    ///
    /// Only the grade-A price is used.
    pub fn net_profit(&self) -> f64 {
        let revenue = self.price_special * self.quantity;
        let costs = self.transport_cost + self.fee;
        revenue - costs
    }

    /// `"market corporation"`, as used in recommendation messages.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.market_name, self.corporation_name)
    }
}
