//! Shared fixtures for the FarmProfit integration tests.
//!
//! Provides hand-built auction records, price-table rows, the captured
//! upstream listing markup, and a one-shot local HTTP server so fetch tests
//! never touch the real site.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use farmprofit::models::{MarketRecord, MarketRow};

/// Captured `sanRealtime.do` listing: four data rows plus a "no data" row.
pub const LISTING_HTML: &str = include_str!("../fixtures/san_realtime.html");

pub fn record(
    market: &str,
    corporation: &str,
    variety: &str,
    origin: Option<&str>,
    volume_kg: f64,
    price_won: f64,
) -> MarketRecord {
    MarketRecord {
        market: market.to_string(),
        corporation: corporation.to_string(),
        variety: variety.to_string(),
        origin: origin.map(str::to_string),
        volume_kg,
        price_won,
    }
}

/// Five records over three markets and two varieties.
///
/// Red paprika, corporation view:
/// - 진주 진주원협(공): 150 kg, avg 26,000 (25,000 – 28,000)
/// - 부산엄궁 부산청과: 200 kg, avg 23,000
/// - 서울가락 중앙청과: 0 kg, avg 0
///
/// Yellow paprika: 서울가락 중앙청과, 80 kg at 27,000.
pub fn sample_records() -> Vec<MarketRecord> {
    vec![
        record("진주", "진주원협(공)", "빨강파프리카", Some("경남 진주시"), 100.0, 25000.0),
        record("서울가락", "중앙청과", "노랑파프리카", Some("강원 철원군"), 80.0, 27000.0),
        record("부산엄궁", "부산청과", "빨강파프리카", Some("경남 김해시"), 200.0, 23000.0),
        record("진주", "진주원협(공)", "빨강파프리카", Some("경남 진주시"), 50.0, 28000.0),
        record("서울가락", "중앙청과", "빨강파프리카", None, 0.0, 0.0),
    ]
}

pub fn market_row(
    market: &str,
    corporation: &str,
    price_special: f64,
    quantity: f64,
    transport_cost: f64,
    fee: f64,
) -> MarketRow {
    MarketRow {
        market_name: market.to_string(),
        corporation_name: corporation.to_string(),
        price_special,
        price_regular: price_special,
        quantity,
        transport_cost,
        fee,
    }
}

/// Serve exactly one HTTP response on a random local port.
///
/// Returns the base URL and a handle yielding the raw request head.
/// `on_request` runs after the request is read and before the response is written.
pub fn serve_once<F>(status: u16, body: &str, on_request: F) -> (String, JoinHandle<String>)
where
    F: FnOnce() + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line).unwrap();
            if n == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }

        on_request();

        let reason = if status == 200 { "OK" } else { "Internal Server Error" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        head
    });

    (format!("http://{}/domeinfo/sanRealtime.do", addr), handle)
}
