//! Aggregator tests against the shared sample records.

mod common;

use farmprofit::models::ViewMode;
use farmprofit::queries::{
    aggregate, available_regions, best_group, RegionSelection, StatsFilter, StatsQuery,
    VarietyFilter,
};

fn corp_filter() -> StatsFilter {
    StatsFilter::default()
}

// ---------------------------------------------------------------------------
// Grouping and ranking
// ---------------------------------------------------------------------------

#[test]
fn empty_input_gives_empty_result() {
    assert!(aggregate(&[], &corp_filter()).is_empty());
}

#[test]
fn varieties_keep_encounter_order() {
    let stats = aggregate(&common::sample_records(), &corp_filter());
    let names: Vec<&str> = stats.iter().map(|s| s.variety.as_str()).collect();
    assert_eq!(names, vec!["빨강파프리카", "노랑파프리카"]);
    assert_eq!(stats[0].label, "빨강");
    assert_eq!(stats[1].label, "노랑");
}

#[test]
fn corporation_view_sums_and_ranks_by_average() {
    let stats = aggregate(&common::sample_records(), &corp_filter());
    let red = &stats[0];
    let keys: Vec<&str> = red.groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["진주 진주원협(공)", "부산엄궁 부산청과", "서울가락 중앙청과"]);

    let jinju = &red.groups[0];
    assert_eq!(jinju.name, "진주원협(공)");
    assert_eq!(jinju.market, "진주");
    assert_eq!(jinju.total_volume, 150.0);
    assert_eq!(jinju.total_amount, 3_900_000.0);
    assert_eq!(jinju.average(), 26_000.0);
    assert_eq!(jinju.min(), Some(25_000.0));
    assert_eq!(jinju.max(), Some(28_000.0));
}

#[test]
fn zero_volume_group_reports_zero_average() {
    let stats = aggregate(&common::sample_records(), &corp_filter());
    let seoul = &stats[0].groups[2];
    assert_eq!(seoul.total_volume, 0.0);
    assert_eq!(seoul.average(), 0.0);
    assert!(seoul.average().is_finite());
}

#[test]
fn ties_keep_encounter_order() {
    let records = vec![
        common::record("가", "A", "파프리카", None, 10.0, 1000.0),
        common::record("나", "B", "파프리카", None, 20.0, 1000.0),
        common::record("다", "C", "파프리카", None, 5.0, 2000.0),
    ];
    let stats = aggregate(&records, &corp_filter());
    let names: Vec<&str> = stats[0].groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn untouched_group_shows_dash_for_min_and_max() {
    let group = farmprofit::models::AggregatedGroup::new("k", "n", "m");
    assert_eq!(group.min(), None);
    assert_eq!(group.min_display(), "-");
    assert_eq!(group.max_display(), "-");
    assert_eq!(group.average(), 0.0);
}

#[test]
fn group_serializes_without_infinities() {
    let group = farmprofit::models::AggregatedGroup::new("k", "n", "m");
    let v = serde_json::to_value(&group).unwrap();
    assert!(v["minPrice"].is_null());
    assert!(v["maxPrice"].is_null());
    assert_eq!(v["averagePrice"], 0.0);
}

// ---------------------------------------------------------------------------
// Origin view
// ---------------------------------------------------------------------------

#[test]
fn origin_view_groups_by_first_token() {
    let filter = StatsFilter {
        view: ViewMode::Origin,
        ..Default::default()
    };
    let stats = aggregate(&common::sample_records(), &filter);
    let red = &stats[0];
    let keys: Vec<&str> = red.groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["경남", "기타"]);

    let gyeongnam = &red.groups[0];
    assert_eq!(gyeongnam.name, "경남");
    assert_eq!(gyeongnam.market, "진주");
    assert_eq!(gyeongnam.total_volume, 350.0);
    assert_eq!(gyeongnam.total_amount, 8_500_000.0);
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn variety_filter_is_exact() {
    let filter = StatsFilter {
        variety: VarietyFilter::parse("노랑파프리카"),
        ..Default::default()
    };
    let stats = aggregate(&common::sample_records(), &filter);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].variety, "노랑파프리카");

    assert_eq!(VarietyFilter::parse("ALL"), VarietyFilter::All);
    assert_eq!(VarietyFilter::parse(""), VarietyFilter::All);
}

#[test]
fn region_filter_uses_market_prefix() {
    let filter = StatsFilter {
        regions: RegionSelection::parse("진주,부산"),
        ..Default::default()
    };
    let stats = aggregate(&common::sample_records(), &filter);
    assert_eq!(stats.len(), 1);
    let keys: Vec<&str> = stats[0].groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["진주 진주원협(공)", "부산엄궁 부산청과"]);
}

#[test]
fn region_filter_lets_marketless_records_through() {
    let records = vec![common::record("", "무소속", "파프리카", None, 1.0, 100.0)];
    let filter = StatsFilter {
        regions: RegionSelection::parse("진주"),
        ..Default::default()
    };
    assert_eq!(aggregate(&records, &filter).len(), 1);
}

#[test]
fn search_matches_corporation_or_origin() {
    let by_corp = StatsFilter {
        search: Some("부산".into()),
        ..Default::default()
    };
    let stats = aggregate(&common::sample_records(), &by_corp);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].groups.len(), 1);
    assert_eq!(stats[0].groups[0].name, "부산청과");

    let by_origin = StatsFilter {
        search: Some("철원".into()),
        ..Default::default()
    };
    let stats = aggregate(&common::sample_records(), &by_origin);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].variety, "노랑파프리카");
}

#[test]
fn blank_search_matches_everything() {
    let filter = StatsFilter {
        search: Some(String::new()),
        ..Default::default()
    };
    let total: usize = aggregate(&common::sample_records(), &filter)
        .iter()
        .map(|s| s.groups.len())
        .sum();
    assert_eq!(total, 4);
}

#[test]
fn filtering_does_not_change_unrelated_group_totals() {
    let all = aggregate(&common::sample_records(), &corp_filter());
    let narrowed = aggregate(
        &common::sample_records(),
        &StatsFilter {
            regions: RegionSelection::parse("진주"),
            ..Default::default()
        },
    );
    let before = all[0].groups.iter().find(|g| g.market == "진주").unwrap();
    let after = &narrowed[0].groups[0];
    assert_eq!(before, after);
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

#[test]
fn available_regions_are_sorted_and_unique() {
    assert_eq!(
        available_regions(&common::sample_records()),
        vec!["부산", "서울", "진주"]
    );
}

#[test]
fn toggling_regions() {
    let mut sel = RegionSelection::All;
    sel.toggle("진주");
    assert_eq!(sel, RegionSelection::Only(vec!["진주".into()]));
    sel.toggle("부산");
    assert_eq!(sel, RegionSelection::Only(vec!["진주".into(), "부산".into()]));
    sel.toggle("진주");
    assert_eq!(sel, RegionSelection::Only(vec!["부산".into()]));
    sel.toggle("부산");
    assert_eq!(sel, RegionSelection::All);

    sel.toggle("서울");
    sel.toggle("ALL");
    assert_eq!(sel, RegionSelection::All);
}

#[test]
fn region_selection_with_all_selects_everything() {
    assert_eq!(RegionSelection::parse("진주,ALL"), RegionSelection::All);
    assert_eq!(RegionSelection::parse(""), RegionSelection::All);
}

// ---------------------------------------------------------------------------
// Best group
// ---------------------------------------------------------------------------

#[test]
fn best_group_reports_runner_up_gap() {
    let stats = aggregate(&common::sample_records(), &corp_filter());
    let pick = best_group(&stats[0]).unwrap();
    assert_eq!(pick.best.name, "진주원협(공)");
    assert_eq!(pick.runner_up.as_ref().unwrap().name, "부산청과");
    assert_eq!(pick.price_gap, 3_000.0);
    assert_eq!(pick.profit_gap, 450_000.0);
}

#[test]
fn best_group_without_runner_up_has_zero_gap() {
    let stats = aggregate(&common::sample_records(), &corp_filter());
    let pick = best_group(&stats[1]).unwrap();
    assert!(pick.runner_up.is_none());
    assert_eq!(pick.price_gap, 0.0);
    assert_eq!(pick.profit_gap, 0.0);
}

#[test]
fn stats_query_best_covers_each_variety() {
    let records = common::sample_records();
    let picks = StatsQuery::new(&records).best(&corp_filter());
    assert_eq!(picks.len(), 2);
    assert_eq!(picks[1].variety, "노랑파프리카");
}
