//! Row normalizer tests: numeric coercion, alias resolution, list extraction.

use farmprofit::models::{AuctionRow, MarketRecord, MarketRow};
use farmprofit::normalize::{
    extract_list, parse_int_prefix, parse_market_records, parse_market_rows, records_from_auctions,
    to_number, PRICE, QUANTITY,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// to_number
// ---------------------------------------------------------------------------

#[test]
fn numbers_pass_through() {
    assert_eq!(to_number(&json!(12500)), 12500.0);
    assert_eq!(to_number(&json!(12.5)), 12.5);
}

#[test]
fn strings_drop_thousands_separators() {
    assert_eq!(to_number(&json!("25,500")), 25500.0);
    assert_eq!(to_number(&json!(" 1,234,567 ")), 1234567.0);
}

#[test]
fn strings_parse_leading_number_only() {
    assert_eq!(to_number(&json!("5kg")), 5.0);
    assert_eq!(to_number(&json!("12.75원")), 12.75);
    assert_eq!(to_number(&json!(".5")), 0.5);
}

#[test]
fn missing_or_garbage_becomes_zero() {
    for v in [json!(null), json!(""), json!("abc"), json!("-"), json!(true), json!([1]), json!({})] {
        assert_eq!(to_number(&v), 0.0, "input {v}");
    }
}

#[test]
fn negative_values_clamp_to_zero() {
    assert_eq!(to_number(&json!(-5)), 0.0);
    assert_eq!(to_number(&json!("-1,000")), 0.0);
}

#[test]
fn int_prefix_truncates() {
    assert_eq!(parse_int_prefix("25,500"), 25500);
    assert_eq!(parse_int_prefix("12.9"), 12);
    assert_eq!(parse_int_prefix("  300 kg"), 300);
    assert_eq!(parse_int_prefix("abc"), 0);
    assert_eq!(parse_int_prefix(""), 0);
}

// ---------------------------------------------------------------------------
// Aliases
// ---------------------------------------------------------------------------

#[test]
fn first_present_alias_wins() {
    let obj = json!({ "price": "9,000", "currPrice": 1 });
    let map = obj.as_object().unwrap();
    assert_eq!(PRICE.number(map), 9000.0);

    let obj = json!({ "cost": 100, "price": 200 });
    assert_eq!(PRICE.number(obj.as_object().unwrap()), 100.0);
}

#[test]
fn null_alias_falls_through_to_next() {
    let obj = json!({ "qty": null, "volume": "40" });
    assert_eq!(QUANTITY.number(obj.as_object().unwrap()), 40.0);
}

#[test]
fn empty_string_alias_still_wins() {
    let obj = json!({ "qty": "", "volume": "40" });
    assert_eq!(QUANTITY.number(obj.as_object().unwrap()), 0.0);
}

// ---------------------------------------------------------------------------
// extract_list
// ---------------------------------------------------------------------------

#[test]
fn extract_list_accepts_bare_array_and_wrappers() {
    assert_eq!(extract_list(&json!([1, 2])).len(), 2);
    assert_eq!(extract_list(&json!({ "list": [1] })).len(), 1);
    assert_eq!(extract_list(&json!({ "data": [1, 2, 3] })).len(), 3);
    assert_eq!(extract_list(&json!({ "sanList": [1] })).len(), 1);
    assert_eq!(extract_list(&json!({ "result": [1, 2] })).len(), 2);
}

#[test]
fn extract_list_rejects_other_shapes() {
    assert!(extract_list(&json!({ "error": "boom" })).is_empty());
    assert!(extract_list(&json!({ "data": "nope" })).is_empty());
    assert!(extract_list(&json!("text")).is_empty());
    assert!(extract_list(&json!(null)).is_empty());
}

// ---------------------------------------------------------------------------
// parse_market_rows
// ---------------------------------------------------------------------------

#[test]
fn parse_market_rows_maps_route_output() {
    let data = json!([
        {
            "date": "2024-01-05", "time": "08:12:31",
            "market": "진주", "company": "진주원협(공)",
            "variety": "빨강파프리카", "unit": "5kg 상자",
            "volume": "1,200", "price": 25500
        }
    ]);
    let rows = parse_market_rows(&data);
    assert_eq!(
        rows,
        vec![MarketRow {
            market_name: "진주".into(),
            corporation_name: "진주원협(공)".into(),
            price_special: 25500.0,
            price_regular: 25500.0,
            quantity: 1200.0,
            transport_cost: 0.0,
            fee: 0.0,
        }]
    );
}

#[test]
fn parse_market_rows_reads_alternate_keys() {
    let data = json!({ "sanList": [
        { "whsalName": " 가락 ", "cmpName": "서울청과", "currPrice": "3,100", "qty": 7, "transport": 5000, "fee": "200" }
    ]});
    let rows = parse_market_rows(&data);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].market_name, "가락");
    assert_eq!(rows[0].corporation_name, "서울청과");
    assert_eq!(rows[0].price_special, 3100.0);
    assert_eq!(rows[0].quantity, 7.0);
    assert_eq!(rows[0].transport_cost, 5000.0);
    assert_eq!(rows[0].fee, 200.0);
}

#[test]
fn parse_market_rows_drops_rows_without_market_and_corporation() {
    let data = json!([
        { "price": 100 },
        null,
        { "market": "", "company": "  " },
        { "market": "부산" },
        { "company": "엄궁" }
    ]);
    let rows = parse_market_rows(&data);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].market_name, "부산");
    assert_eq!(rows[0].corporation_name, "-");
    assert_eq!(rows[1].market_name, "-");
}

// ---------------------------------------------------------------------------
// parse_market_records
// ---------------------------------------------------------------------------

#[test]
fn parse_market_records_defaults_variety_and_origin() {
    let data = json!([
        { "market": "진주", "company": "진주원협(공)", "volume": "10", "price": "12,000" },
        { "market": "진주", "company": "진주원협(공)", "variety": "노랑파프리카", "origin": "경남 진주시", "volume": 5, "price": 9000 }
    ]);
    let records = parse_market_records(&data);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].variety, "파프리카");
    assert_eq!(records[0].origin, None);
    assert_eq!(records[0].price_won, 12000.0);
    assert_eq!(records[1].origin.as_deref(), Some("경남 진주시"));
    assert_eq!(records[1].volume_kg, 5.0);
}

#[test]
fn auction_rows_convert_to_records() {
    let rows = vec![
        AuctionRow {
            date: "2024-01-05".into(),
            time: "08:00:00".into(),
            market: "진주".into(),
            company: "진주원협(공)".into(),
            variety: "".into(),
            unit: "5kg 상자".into(),
            volume: "1,200".into(),
            price: 25500,
        },
        AuctionRow {
            date: "2024-01-05".into(),
            time: "08:00:00".into(),
            market: " ".into(),
            company: "".into(),
            variety: "빨강파프리카".into(),
            unit: "".into(),
            volume: "3".into(),
            price: 1,
        },
    ];
    let records = records_from_auctions(&rows);
    assert_eq!(
        records,
        vec![MarketRecord {
            market: "진주".into(),
            corporation: "진주원협(공)".into(),
            variety: "파프리카".into(),
            origin: None,
            volume_kg: 1200.0,
            price_won: 25500.0,
        }]
    );
}
