use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FarmProfitError, Result};

// ---------------------------------------------------------------------------
// SaleDate — Auction date in the upstream's YYYYMMDD form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaleDate(NaiveDate);

impl SaleDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse `YYYYMMDD` or the date-input form `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Result<Self> {
        let compact: String = s.trim().chars().filter(|c| *c != '-').collect();
        NaiveDate::parse_from_str(&compact, "%Y%m%d")
            .map(Self)
            .map_err(|_| FarmProfitError::InvalidArgument(format!("Invalid sale date: {s:?}")))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for SaleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl FromStr for SaleDate {
    type Err = FarmProfitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for SaleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SaleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SaleQuery — Parameters of one upstream fetch
// ---------------------------------------------------------------------------

/// Request body of the market-price route: `{ "saleDate": "20240105", "smallCd": "03" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleQuery {
    pub sale_date: SaleDate,
    #[serde(default)]
    pub small_cd: String,
}

impl SaleQuery {
    pub fn new(sale_date: SaleDate, small_cd: impl Into<String>) -> Self {
        Self {
            sale_date,
            small_cd: small_cd.into(),
        }
    }

    /// All paprika varieties for the given date.
    pub fn all_varieties(sale_date: SaleDate) -> Self {
        Self::new(sale_date, "")
    }
}
