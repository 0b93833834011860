//! HTML table adapters for the upstream auction page.
//!
//! The upstream has no API; rows are read positionally from its results
//! table. All knowledge of that markup lives behind [`TableAdapter`] so a
//! layout change breaks one place (and its fixture test) only.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{FarmProfitError, Result};
use crate::models::AuctionRow;
use crate::normalize::parse_int_prefix;

/// Turns an upstream HTML page into auction rows.
pub trait TableAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Parse every data row on the page. A page without rows yields an empty vec.
    fn parse(&self, html: &str) -> Result<Vec<AuctionRow>>;
}

// ---------------------------------------------------------------------------
// SanRealtimeTable
// ---------------------------------------------------------------------------

/// Adapter for the `sanRealtime.do` real-time auction listing.
///
/// Rows with fewer than [`SanRealtimeTable::MIN_CELLS`] cells (headers,
/// "no data" placeholders) are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SanRealtimeTable;

impl SanRealtimeTable {
    pub const ROW_SELECTOR: &'static str = "table.table_type_sub.small tbody tr";
    pub const MIN_CELLS: usize = 12;

    pub const COL_DATE: usize = 0;
    pub const COL_TIME: usize = 1;
    pub const COL_MARKET: usize = 2;
    pub const COL_COMPANY: usize = 3;
    pub const COL_VARIETY: usize = 7;
    pub const COL_UNIT: usize = 9;
    pub const COL_VOLUME: usize = 10;
    pub const COL_PRICE: usize = 11;
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FarmProfitError::Scrape(format!("bad selector {css:?}: {e}")))
}

fn cell_text(cells: &[ElementRef<'_>], idx: usize) -> String {
    cells
        .get(idx)
        .map(|c| c.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

impl TableAdapter for SanRealtimeTable {
    fn name(&self) -> &'static str {
        "sanRealtime"
    }

    fn parse(&self, html: &str) -> Result<Vec<AuctionRow>> {
        let row_sel = selector(Self::ROW_SELECTOR)?;
        let cell_sel = selector("td")?;
        let doc = Html::parse_document(html);

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for tr in doc.select(&row_sel) {
            let cells: Vec<ElementRef<'_>> = tr.select(&cell_sel).collect();
            if cells.len() < Self::MIN_CELLS {
                skipped += 1;
                continue;
            }
            let price = parse_int_prefix(&cell_text(&cells, Self::COL_PRICE)).max(0) as u64;
            rows.push(AuctionRow {
                date: cell_text(&cells, Self::COL_DATE),
                time: cell_text(&cells, Self::COL_TIME),
                market: cell_text(&cells, Self::COL_MARKET),
                company: cell_text(&cells, Self::COL_COMPANY),
                variety: cell_text(&cells, Self::COL_VARIETY),
                unit: cell_text(&cells, Self::COL_UNIT),
                volume: cell_text(&cells, Self::COL_VOLUME),
                price,
            });
        }

        debug!(adapter = self.name(), rows = rows.len(), skipped, "parsed auction table");
        Ok(rows)
    }
}
