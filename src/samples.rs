//! Built-in sample quotes per crop.
//!
//! Shown when live data is unavailable for a crop, or a fetch returns no rows.

use crate::models::MarketRow;

fn row(
    market: &str,
    corporation: &str,
    price_special: f64,
    price_regular: f64,
    quantity: f64,
    transport_cost: f64,
    fee: f64,
) -> MarketRow {
    MarketRow {
        market_name: market.to_string(),
        corporation_name: corporation.to_string(),
        price_special,
        price_regular,
        quantity,
        transport_cost,
        fee,
    }
}

fn paprica() -> Vec<MarketRow> {
    vec![
        row("가락시장", "중앙청과", 12500.0, 9800.0, 200.0, 45000.0, 12000.0),
        row("부산", "엄궁", 11800.0, 9200.0, 200.0, 82000.0, 11500.0),
        row("대구", "서부시장", 12200.0, 9500.0, 200.0, 68000.0, 11800.0),
        row("청과물시장", "강남청과", 12000.0, 9400.0, 200.0, 38000.0, 11000.0),
    ]
}

/// Sample rows for a crop slug; unknown crops get the paprika samples.
pub fn sample_market_rows(crop_slug: &str) -> Vec<MarketRow> {
    match crop_slug {
        "paprica" => paprica(),
        "strawberry" => vec![
            row("가락시장", "중앙청과", 18500.0, 15200.0, 150.0, 42000.0, 14000.0),
            row("부산", "엄궁", 17800.0, 14800.0, 150.0, 75000.0, 13200.0),
        ],
        "tomato" => vec![
            row("가락시장", "중앙청과", 4200.0, 3500.0, 500.0, 55000.0, 18000.0),
            row("부산", "엄궁", 4000.0, 3300.0, 500.0, 92000.0, 17000.0),
        ],
        "cucumber" => vec![
            row("가락시장", "중앙청과", 3200.0, 2800.0, 400.0, 48000.0, 15000.0),
            row("부산", "엄궁", 3100.0, 2700.0, 400.0, 85000.0, 14500.0),
        ],
        "pepper" => vec![
            row("가락시장", "중앙청과", 9800.0, 8200.0, 180.0, 44000.0, 12500.0),
            row("부산", "엄궁", 9500.0, 8000.0, 180.0, 78000.0, 12000.0),
        ],
        _ => paprica(),
    }
}

/// Live rows when there are any, otherwise the crop's samples.
pub fn rows_or_samples(rows: Vec<MarketRow>, crop_slug: &str) -> Vec<MarketRow> {
    if rows.is_empty() {
        sample_market_rows(crop_slug)
    } else {
        rows
    }
}
