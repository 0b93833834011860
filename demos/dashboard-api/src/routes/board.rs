//! The dashboard board: one selected sale date held in memory, queried per
//! request with the current filters.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use farmprofit::models::ViewMode;
use farmprofit::queries::{RegionSelection, StatsFilter, VarietyFilter};
use farmprofit::{config, MarketSnapshot};
use serde::Deserialize;
use serde_json::{json, Value};

use super::SaleDateBody;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StatsParams {
    pub view: Option<ViewMode>,
    pub variety: Option<String>,
    /// Comma-separated regions, e.g. `진주,부산`.
    pub regions: Option<String>,
    pub search: Option<String>,
}

impl StatsParams {
    fn filter(&self) -> StatsFilter {
        StatsFilter {
            view: self.view.unwrap_or_default(),
            variety: VarietyFilter::parse(self.variety.as_deref().unwrap_or_default()),
            regions: RegionSelection::parse(self.regions.as_deref().unwrap_or_default()),
            search: self.search.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct CorporationParams {
    pub market: String,
    pub corporation: String,
}

#[derive(Deserialize)]
pub struct CropParams {
    pub crop: Option<String>,
}

fn with_board<R>(state: &AppState, f: impl FnOnce(&MarketSnapshot) -> R) -> Result<R, AppError> {
    state
        .board
        .with(f)
        .ok_or_else(|| AppError::not_found("No sale date selected; POST /api/board first"))
}

/// POST /api/board  `{ "saleDate": "20240105", "smallCd": "" }`
///
/// Select a sale date and load it. If another date is selected before this
/// fetch completes, the result is dropped, `applied` is false and `rows` is
/// null.
pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaleDateBody>,
) -> Result<Json<Value>, AppError> {
    let query = body.into_query()?;
    let sale_date = query.sale_date;
    let rows = state.client.refresh_into(&state.board, query).await?;

    Ok(Json(json!({
        "saleDate": sale_date,
        "applied": rows.is_some(),
        "rows": rows
    })))
}

/// GET /api/board/regions
pub async fn regions(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let regions = with_board(&state, |s| s.stats().regions())?;
    Ok(Json(json!({ "data": regions })))
}

/// GET /api/board/stats?view=CORP&variety=ALL&regions=진주,부산&search=
pub async fn stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Value>, AppError> {
    let filter = params.filter();
    let stats = with_board(&state, |s| s.stats().aggregate(&filter))?;
    Ok(Json(json!({ "data": stats })))
}

/// GET /api/board/distribution?market=진주&corporation=진주원협(공)
pub async fn distribution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CorporationParams>,
) -> Result<Json<Value>, AppError> {
    let d = with_board(&state, |s| {
        s.distribution().detail(&params.market, &params.corporation)
    })?;
    Ok(Json(json!({ "data": d })))
}

/// GET /api/board/preview?view=CORP&variety=ALL
///
/// Five-slot preview bars for every group the stats filter yields, in
/// ranked order.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Value>, AppError> {
    let filter = params.filter();
    let bars = with_board(&state, |s| {
        let stats = s.stats().aggregate(&filter);
        s.distribution().preview_bars(&stats)
    })?;
    Ok(Json(json!({ "data": bars })))
}

/// GET /api/board/recommend?crop=paprica
///
/// Most profitable destination. Falls back to the crop's sample rows when the
/// board has no price-table rows.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CropParams>,
) -> Result<Json<Value>, AppError> {
    let slug = params.crop.unwrap_or_else(|| "paprica".to_string());
    let rows = with_board(&state, |s| s.market_rows_or_samples(&slug))
        .unwrap_or_else(|_| farmprofit::samples::sample_market_rows(&slug));
    let snapshot = MarketSnapshot::from_market_rows(rows);
    let rec = snapshot
        .recommend()
        .best()
        .ok_or_else(|| AppError::not_found("No market rows to rank"))?;
    let summary = rec.summary(config::crop_name(&slug));

    Ok(Json(json!({ "data": rec, "summary": summary })))
}

/// GET /api/board/best?view=CORP&regions=진주
///
/// Highest-average group per variety with the gap to the runner-up.
pub async fn best(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Value>, AppError> {
    let filter = params.filter();
    let picks = with_board(&state, |s| s.stats().best(&filter))?;
    Ok(Json(json!({ "data": picks })))
}
