//! Ingestion boundary: turns loosely-typed upstream JSON into canonical records.
//!
//! Upstream payloads name the same logical field several ways and mix numbers
//! with formatted strings. Every field has an ordered alias list that is
//! resolved exactly once here; nothing downstream looks at raw keys again.
//! Numeric parsing is lenient by policy: anything unparseable becomes 0.

use serde_json::{Map, Value};

use crate::config::DEFAULT_VARIETY;
use crate::models::{AuctionRow, MarketRecord, MarketRow};

// ---------------------------------------------------------------------------
// Field aliases
// ---------------------------------------------------------------------------

/// Accepted key names for one logical field, in priority order.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub field: &'static str,
    pub keys: &'static [&'static str],
}

pub const PRICE: FieldAliases = FieldAliases {
    field: "price",
    keys: &["cost", "price", "currPrice"],
};

pub const QUANTITY: FieldAliases = FieldAliases {
    field: "quantity",
    keys: &["qty", "quantity", "volume", "vol"],
};

pub const MARKET: FieldAliases = FieldAliases {
    field: "market",
    keys: &["market", "whsalName", "whsal", "marketName"],
};

pub const CORPORATION: FieldAliases = FieldAliases {
    field: "corporation",
    keys: &["company", "cmpName", "cmp", "corporationName"],
};

pub const TRANSPORT_COST: FieldAliases = FieldAliases {
    field: "transportCost",
    keys: &["transportCost", "transport"],
};

pub const FEE: FieldAliases = FieldAliases {
    field: "fee",
    keys: &["fee"],
};

pub const VARIETY: FieldAliases = FieldAliases {
    field: "variety",
    keys: &["variety"],
};

pub const ORIGIN: FieldAliases = FieldAliases {
    field: "origin",
    keys: &["origin"],
};

/// Keys that may wrap the row array in an object response, in priority order.
pub const LIST_KEYS: &[&str] = &["list", "data", "sanList", "result"];

impl FieldAliases {
    /// First alias that is present and not `null`. An empty string still wins.
    pub fn resolve<'a>(&self, obj: &'a Map<String, Value>) -> Option<&'a Value> {
        self.keys
            .iter()
            .filter_map(|k| obj.get(*k))
            .find(|v| !v.is_null())
    }

    pub fn number(&self, obj: &Map<String, Value>) -> f64 {
        self.resolve(obj).map(to_number).unwrap_or(0.0)
    }

    /// Trimmed text of the resolved value; numbers are rendered as text.
    pub fn text(&self, obj: &Map<String, Value>) -> String {
        match self.resolve(obj) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string().trim().to_string(),
            None => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Coerce a JSON value to a non-negative number.
///
/// Numbers pass through. Strings lose their thousands separators and the
/// longest leading decimal is parsed, so `"1,250"` → 1250 and `"5kg"` → 5.
/// Everything else, and any negative or non-finite result, becomes 0.
pub fn to_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_number_prefix(s),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

/// Parse the leading decimal number of `s` after stripping `,` separators.
/// Returns 0 when there is none. May be negative.
pub fn parse_number_prefix(s: &str) -> f64 {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    let t = cleaned.trim();
    let b = t.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if j > frac_start {
            i = j;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    t[..i].parse::<f64>().unwrap_or(0.0)
}

/// Parse the leading integer of `s` after stripping `,` separators.
/// `"25,500"` → 25500, `"12.9"` → 12, `"abc"` → 0.
pub fn parse_int_prefix(s: &str) -> i64 {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    let t = cleaned.trim();
    let b = t.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == start {
        return 0;
    }
    t[..i].parse::<i64>().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Row extraction
// ---------------------------------------------------------------------------

/// Locate the row array in an API response.
///
/// Accepts a bare array or an object wrapping it under one of [`LIST_KEYS`].
pub fn extract_list(data: &Value) -> &[Value] {
    match data {
        Value::Array(arr) => arr,
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn as_object(item: &Value) -> Map<String, Value> {
    match item {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    }
}

fn dash_if_empty(s: String) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s
    }
}

/// Convert an API response into price-table rows.
///
/// Both prices take the single upstream price; transport cost and fee default
/// to 0. Rows with neither a market nor a corporation are dropped.
pub fn parse_market_rows(data: &Value) -> Vec<MarketRow> {
    extract_list(data)
        .iter()
        .map(|item| {
            let obj = as_object(item);
            let price = PRICE.number(&obj);
            MarketRow {
                market_name: dash_if_empty(MARKET.text(&obj)),
                corporation_name: dash_if_empty(CORPORATION.text(&obj)),
                price_special: price,
                price_regular: price,
                quantity: QUANTITY.number(&obj),
                transport_cost: TRANSPORT_COST.number(&obj),
                fee: FEE.number(&obj),
            }
        })
        .filter(|r| r.market_name != "-" || r.corporation_name != "-")
        .collect()
}

/// Convert an API response into records for the aggregator.
pub fn parse_market_records(data: &Value) -> Vec<MarketRecord> {
    extract_list(data)
        .iter()
        .map(|item| {
            let obj = as_object(item);
            let variety = VARIETY.text(&obj);
            let origin = ORIGIN.text(&obj);
            MarketRecord {
                market: MARKET.text(&obj),
                corporation: CORPORATION.text(&obj),
                variety: if variety.is_empty() {
                    DEFAULT_VARIETY.to_string()
                } else {
                    variety
                },
                origin: (!origin.is_empty()).then_some(origin),
                volume_kg: QUANTITY.number(&obj),
                price_won: PRICE.number(&obj),
            }
        })
        .filter(|r| !r.market.is_empty() || !r.corporation.is_empty())
        .collect()
}

/// Records for scraped rows, dropping rows with neither market nor corporation.
pub fn records_from_auctions(rows: &[AuctionRow]) -> Vec<MarketRecord> {
    rows.iter()
        .map(MarketRecord::from)
        .filter(|r| !r.market.trim().is_empty() || !r.corporation.trim().is_empty())
        .collect()
}

/// Price-table rows for scraped rows, dropping rows with neither market nor corporation.
pub fn market_rows_from_auctions(rows: &[AuctionRow]) -> Vec<MarketRow> {
    rows.iter()
        .map(MarketRow::from)
        .filter(|r| r.market_name != "-" || r.corporation_name != "-")
        .collect()
}
