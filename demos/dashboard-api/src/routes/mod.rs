pub mod board;
pub mod crops;
pub mod market_price;

use farmprofit::models::{SaleDate, SaleQuery};
use serde::Deserialize;

use crate::error::AppError;

/// Body of the date-selecting routes: `{ "saleDate": "20240105", "smallCd": "03" }`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDateBody {
    pub sale_date: Option<String>,
    pub small_cd: Option<String>,
}

impl SaleDateBody {
    pub fn into_query(self) -> Result<SaleQuery, AppError> {
        let raw = self
            .sale_date
            .ok_or_else(|| AppError::bad_request("Missing required field: saleDate"))?;
        let sale_date = SaleDate::parse(&raw)?;
        Ok(SaleQuery::new(sale_date, self.small_cd.unwrap_or_default()))
    }
}
