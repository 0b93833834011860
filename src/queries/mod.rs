//! Query modules over an in-memory [`MarketSnapshot`](crate::MarketSnapshot).
//!
//! Each module exposes free functions over record slices plus a lightweight
//! query struct that borrows from a snapshot.

pub mod distribution;
pub mod recommend;
pub mod stats;

pub use distribution::{distribution, preview, preview_bars, DistributionQuery};
pub use recommend::{ranked, recommend, RecommendQuery};
pub use stats::{
    aggregate, available_regions, best_group, RegionSelection, StatsFilter, StatsQuery,
    VarietyFilter, ALL,
};
