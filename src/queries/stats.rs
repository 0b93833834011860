//! Aggregation of auction records into per-variety, per-group statistics.

use std::collections::{BTreeSet, HashMap};

use crate::config::{self, UNKNOWN_ORIGIN};
use crate::models::{AggregatedGroup, GroupPick, MarketRecord, VarietyStats, ViewMode};

/// Sentinel accepted wherever a filter may be switched off.
pub const ALL: &str = "ALL";

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VarietyFilter {
    #[default]
    All,
    Only(String),
}

impl VarietyFilter {
    /// `"ALL"` (or blank) disables the filter; anything else is an exact variety.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() || t == ALL {
            Self::All
        } else {
            Self::Only(t.to_string())
        }
    }

    pub fn matches(&self, variety: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => v == variety,
        }
    }
}

/// Set of selected two-character regions, or every region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionSelection {
    #[default]
    All,
    Only(Vec<String>),
}

impl RegionSelection {
    /// Build from selected region names; an empty list or one containing `ALL`
    /// selects everything.
    pub fn from_regions<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut picked: Vec<String> = Vec::new();
        for r in regions {
            let r = r.as_ref().trim();
            if r == ALL {
                return Self::All;
            }
            if !r.is_empty() && !picked.iter().any(|p| p == r) {
                picked.push(r.to_string());
            }
        }
        if picked.is_empty() {
            Self::All
        } else {
            Self::Only(picked)
        }
    }

    /// Comma-separated form used in query strings: `"진주,부산"`.
    pub fn parse(s: &str) -> Self {
        Self::from_regions(s.split(','))
    }

    /// Toggle one region chip.
    ///
    /// `ALL` resets the selection. Other regions are added or removed; removing
    /// the last one falls back to `ALL`.
    pub fn toggle(&mut self, region: &str) {
        if region == ALL {
            *self = Self::All;
            return;
        }
        let mut current = match std::mem::take(self) {
            Self::All => Vec::new(),
            Self::Only(v) => v,
        };
        if let Some(pos) = current.iter().position(|r| r == region) {
            current.remove(pos);
        } else {
            current.push(region.to_string());
        }
        *self = Self::from_regions(current);
    }

    /// Whether a record with this region passes. An empty region always passes.
    pub fn allows(&self, region: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => region.is_empty() || selected.iter().any(|r| r == region),
        }
    }
}

/// Filters and grouping for one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct StatsFilter {
    pub view: ViewMode,
    pub variety: VarietyFilter,
    pub regions: RegionSelection,
    /// Case-sensitive substring of corporation or origin. Blank disables it.
    pub search: Option<String>,
}

impl StatsFilter {
    /// Apply the filters in order: variety, region, free-text search.
    pub fn matches(&self, record: &MarketRecord) -> bool {
        if !self.variety.matches(&record.variety) {
            return false;
        }
        if !self.regions.allows(&record.region()) {
            return false;
        }
        match self.search.as_deref().filter(|s| !s.is_empty()) {
            None => true,
            Some(term) => {
                record.corporation.contains(term)
                    || record.origin.as_deref().is_some_and(|o| o.contains(term))
            }
        }
    }

    /// Group key and display name of a record under the current view.
    fn group_of(&self, record: &MarketRecord) -> (String, String) {
        match self.view {
            ViewMode::Corporation => (
                format!("{} {}", record.market, record.corporation),
                record.corporation.clone(),
            ),
            ViewMode::Origin => {
                let key = record
                    .origin
                    .as_deref()
                    .and_then(|o| o.split_whitespace().next())
                    .unwrap_or(UNKNOWN_ORIGIN)
                    .to_string();
                (key.clone(), key)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Group filtered records by variety and group key.
///
/// Varieties keep encounter order. Within each variety, groups are ranked by
/// average price descending; equal averages keep encounter order.
pub fn aggregate(records: &[MarketRecord], filter: &StatsFilter) -> Vec<VarietyStats> {
    let mut varieties: Vec<(String, Vec<AggregatedGroup>, HashMap<String, usize>)> = Vec::new();
    let mut variety_index: HashMap<String, usize> = HashMap::new();

    for record in records.iter().filter(|r| filter.matches(r)) {
        let vi = *variety_index.entry(record.variety.clone()).or_insert_with(|| {
            varieties.push((record.variety.clone(), Vec::new(), HashMap::new()));
            varieties.len() - 1
        });
        let (_, groups, group_index) = &mut varieties[vi];

        let (key, name) = filter.group_of(record);
        let gi = *group_index.entry(key.clone()).or_insert_with(|| {
            groups.push(AggregatedGroup::new(key, name, record.market.clone()));
            groups.len() - 1
        });
        groups[gi].add(record.price_won, record.volume_kg);
    }

    varieties
        .into_iter()
        .map(|(variety, mut groups, _)| {
            groups.sort_by(|a, b| b.average().total_cmp(&a.average()));
            VarietyStats {
                label: config::variety_label(&variety),
                variety,
                groups,
            }
        })
        .collect()
}

/// Sorted, de-duplicated region prefixes of every market in the records.
pub fn available_regions(records: &[MarketRecord]) -> Vec<String> {
    records
        .iter()
        .map(MarketRecord::region)
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Top group of an already-ranked variety, with its gap to the runner-up.
pub fn best_group(stats: &VarietyStats) -> Option<GroupPick> {
    let best = stats.groups.first()?.clone();
    let runner_up = stats.groups.get(1).cloned();
    let price_gap = runner_up
        .as_ref()
        .map(|r| (best.average() - r.average()).max(0.0))
        .unwrap_or(0.0);
    Some(GroupPick {
        variety: stats.variety.clone(),
        profit_gap: price_gap * best.total_volume,
        price_gap,
        best,
        runner_up,
    })
}

// ---------------------------------------------------------------------------
// StatsQuery
// ---------------------------------------------------------------------------

/// Query interface over a snapshot's records.
pub struct StatsQuery<'a> {
    records: &'a [MarketRecord],
}

impl<'a> StatsQuery<'a> {
    pub fn new(records: &'a [MarketRecord]) -> Self {
        Self { records }
    }

    pub fn aggregate(&self, filter: &StatsFilter) -> Vec<VarietyStats> {
        aggregate(self.records, filter)
    }

    pub fn regions(&self) -> Vec<String> {
        available_regions(self.records)
    }

    /// Best group per variety under the given filter.
    pub fn best(&self, filter: &StatsFilter) -> Vec<GroupPick> {
        self.aggregate(filter).iter().filter_map(best_group).collect()
    }
}
