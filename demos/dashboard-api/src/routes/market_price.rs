use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use farmprofit::models::AuctionRow;

use super::SaleDateBody;
use crate::error::AppError;
use crate::state::AppState;

/// POST /api/market-price  `{ "saleDate": "20240105", "smallCd": "03" }`
///
/// Scrape the real-time auction listing for one day and return its rows.
pub async fn market_price(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaleDateBody>,
) -> Result<Json<Vec<AuctionRow>>, AppError> {
    let query = body.into_query()?;
    let rows = state
        .client
        .fetch_rows(query)
        .await
        .map_err(AppError::from_fetch)?;
    Ok(Json(rows))
}
