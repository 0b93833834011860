use axum::extract::{Path, Query};
use axum::response::Json;
use farmprofit::config;
use farmprofit::samples::sample_market_rows;
use farmprofit::MarketSnapshot;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;

#[derive(Deserialize)]
pub struct ListCropsParams {
    pub q: Option<String>,
}

/// GET /api/crops?q=파프리카
///
/// Crop catalog. With `q`, also resolves the search input to a slug.
pub async fn list_crops(Query(params): Query<ListCropsParams>) -> Json<Value> {
    let crops: Vec<Value> = config::CROPS
        .iter()
        .map(|(slug, name)| json!({ "slug": slug, "name": name }))
        .collect();
    let resolved = params.q.as_deref().and_then(config::resolve_crop);
    Json(json!({ "data": crops, "resolved": resolved }))
}

/// GET /api/crops/:slug/sample
///
/// Sample price table for a crop, ranked, with the recommendation summary.
pub async fn crop_sample(Path(slug): Path<String>) -> Result<Json<Value>, AppError> {
    if !config::CROPS.iter().any(|(s, _)| *s == slug) {
        return Err(AppError::not_found(format!("Unknown crop: {slug}")));
    }
    let rows = sample_market_rows(&slug);
    let snapshot = MarketSnapshot::from_market_rows(rows);
    let ranked: Vec<Value> = snapshot
        .recommend()
        .ranked()
        .into_iter()
        .map(|(row, profit)| json!({ "row": row, "netProfit": profit }))
        .collect();
    let summary = snapshot
        .recommend()
        .best()
        .map(|rec| rec.summary(config::crop_name(&slug)));

    Ok(Json(json!({
        "crop": config::crop_name(&slug),
        "data": ranked,
        "summary": summary
    })))
}
