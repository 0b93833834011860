//! Shipping recommendation by net profit.

use crate::models::{MarketRow, Recommendation};

/// Pick the row with the highest net profit and compare it with the runner-up.
///
/// Rows are ranked with a stable sort, so equal profits keep input order.
/// Returns `None` for empty input.
pub fn recommend(rows: &[MarketRow]) -> Option<Recommendation> {
    let mut ranked: Vec<(&MarketRow, f64)> = rows.iter().map(|r| (r, r.net_profit())).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (best, best_profit) = ranked.first().copied()?;
    let second = ranked.get(1).copied();

    Some(Recommendation {
        best: best.clone(),
        best_profit,
        compare_to: second.map(|(row, _)| row.clone()),
        profit_diff: second
            .map(|(_, profit)| (best_profit - profit).max(0.0))
            .unwrap_or(0.0),
    })
}

/// Rows ranked by net profit, highest first, paired with their profit.
pub fn ranked(rows: &[MarketRow]) -> Vec<(MarketRow, f64)> {
    let mut out: Vec<(MarketRow, f64)> = rows.iter().map(|r| (r.clone(), r.net_profit())).collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1));
    out
}

pub struct RecommendQuery<'a> {
    rows: &'a [MarketRow],
}

impl<'a> RecommendQuery<'a> {
    pub fn new(rows: &'a [MarketRow]) -> Self {
        Self { rows }
    }

    pub fn best(&self) -> Option<Recommendation> {
        recommend(self.rows)
    }

    pub fn ranked(&self) -> Vec<(MarketRow, f64)> {
        ranked(self.rows)
    }
}
