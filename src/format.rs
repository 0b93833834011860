//! Display formatting for won amounts and price bands.

/// Group an integer with thousands separators: `1234567` → `"1,234,567"`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount as whole won: `2443000.0` → `"2,443,000원"`.
pub fn won(amount: f64) -> String {
    format!("{}원", thousands(round_to_i64(amount)))
}

/// Price with separators, or `-` when there is none.
pub fn price_or_dash(price: Option<f64>) -> String {
    match price {
        Some(p) => thousands(round_to_i64(p)),
        None => "-".to_string(),
    }
}

/// Won expressed in 만 (10,000) with one decimal.
///
/// Rounds the nearest double of `amount / 10000`, so `25500.0` (2.5499…)
/// gives `"2.5"`. Exact ties such as 1.25 round up: `12500.0` → `"1.3"`.
pub fn man(amount: f64) -> String {
    let x = amount / 10_000.0;
    // x * 4 is exact; an odd integer means x * 10 ends in exactly .5
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        let tenths = (x * 10.0 + 0.5).floor() as i64;
        let sign = if tenths < 0 { "-" } else { "" };
        let abs = tenths.unsigned_abs();
        return format!("{}{}.{}", sign, abs / 10, abs % 10);
    }
    format!("{:.1}", x)
}

/// Bucket label for a price band: `"1.2만~1.7만"`.
pub fn band_label(low: f64, high: f64) -> String {
    format!("{}만~{}만", man(low), man(high))
}

fn round_to_i64(v: f64) -> i64 {
    if v.is_finite() {
        v.round() as i64
    } else {
        0
    }
}
