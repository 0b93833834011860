//! Volume-weighted price histograms for a single corporation.

use std::collections::HashSet;

use crate::format;
use crate::models::{MarketRecord, PreviewBars, PriceBucket, PriceDistribution, VarietyStats};

/// Smallest bucket width of the detail histogram, in won.
pub const MIN_STEP: f64 = 500.0;
/// Target number of buckets of the detail histogram.
pub const DETAIL_BUCKETS: f64 = 8.0;
/// Slot count of the compact preview.
pub const PREVIEW_SLOTS: usize = 5;

/// `(price, volume)` pairs of one corporation with both values positive.
fn observations(records: &[MarketRecord], market: &str, corporation: &str) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter(|r| r.market == market && r.corporation == corporation)
        .map(|r| (r.price_won, r.volume_kg))
        .filter(|(p, v)| p.is_finite() && *p > 0.0 && *v > 0.0)
        .collect()
}

fn price_range(obs: &[(f64, f64)]) -> (f64, f64) {
    obs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (p, _)| {
        (lo.min(*p), hi.max(*p))
    })
}

fn percent(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

/// Detail histogram for one corporation.
///
/// Bucket width is `max(500, ceil((max - min) / 8))`; buckets start at the
/// lowest price and empty ones are left out.
pub fn distribution(records: &[MarketRecord], market: &str, corporation: &str) -> PriceDistribution {
    let obs = observations(records, market, corporation);
    if obs.is_empty() {
        return PriceDistribution::default();
    }

    let (min, max) = price_range(&obs);
    let total_kg: f64 = obs.iter().map(|(_, v)| v).sum();
    let weighted: f64 = obs.iter().map(|(p, v)| p * v).sum();
    let avg = (weighted / total_kg).round();

    let step = MIN_STEP.max(((max - min) / DETAIL_BUCKETS).ceil());
    let count = ((max - min) / step).floor() as usize + 1;

    let mut bucket_kg = vec![0.0; count];
    for (price, vol) in &obs {
        let idx = (((price - min) / step).floor() as usize).min(count - 1);
        bucket_kg[idx] += vol;
    }

    let buckets = bucket_kg
        .iter()
        .enumerate()
        .filter(|(_, kg)| **kg > 0.0)
        .map(|(i, kg)| {
            let low = min + step * i as f64;
            PriceBucket {
                label: format::band_label(low, low + step),
                volume_kg: *kg,
                percent: percent(*kg, total_kg),
            }
        })
        .collect();

    PriceDistribution {
        min,
        max,
        avg,
        total_kg,
        buckets,
    }
}

/// Compact five-slot preview of a corporation's volume share per price band.
///
/// Returns percentages; empty when the corporation has no valid records.
pub fn preview(records: &[MarketRecord], market: &str, corporation: &str) -> Vec<f64> {
    let obs = observations(records, market, corporation);
    if obs.is_empty() {
        return Vec::new();
    }

    let (min, max) = price_range(&obs);
    let total_kg: f64 = obs.iter().map(|(_, v)| v).sum();
    let mut step = (max - min) / PREVIEW_SLOTS as f64;
    if step == 0.0 {
        step = 1.0;
    }

    let mut slots = [0.0; PREVIEW_SLOTS];
    for (price, vol) in &obs {
        let idx = (((price - min) / step).floor() as usize).min(PREVIEW_SLOTS - 1);
        slots[idx] += vol;
    }
    slots.iter().map(|kg| percent(*kg, total_kg)).collect()
}

/// Previews for every group of an aggregation, in ranked order.
///
/// A `(market, name)` pair listed under several varieties appears once, at its
/// first position. Groups from the origin view rarely match a corporation and
/// get an empty preview.
pub fn preview_bars(records: &[MarketRecord], stats: &[VarietyStats]) -> Vec<PreviewBars> {
    let mut seen = HashSet::new();
    stats
        .iter()
        .flat_map(|s| s.groups.iter())
        .filter(|g| seen.insert((g.market.as_str(), g.name.as_str())))
        .map(|g| PreviewBars {
            market: g.market.clone(),
            corporation: g.name.clone(),
            bars: preview(records, &g.market, &g.name),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// DistributionQuery
// ---------------------------------------------------------------------------

pub struct DistributionQuery<'a> {
    records: &'a [MarketRecord],
}

impl<'a> DistributionQuery<'a> {
    pub fn new(records: &'a [MarketRecord]) -> Self {
        Self { records }
    }

    pub fn detail(&self, market: &str, corporation: &str) -> PriceDistribution {
        distribution(self.records, market, corporation)
    }

    pub fn preview(&self, market: &str, corporation: &str) -> Vec<f64> {
        preview(self.records, market, corporation)
    }

    pub fn preview_bars(&self, stats: &[VarietyStats]) -> Vec<PreviewBars> {
        preview_bars(self.records, stats)
    }
}
