//! Aggregations behind the dashboard charts
//!
//! All functions are pure. Empty input gives an empty result, never an error.
//! Every count produced here sums to the number of input records.
//!
//! Weeks are ISO weeks: Monday through Sunday, labelled by their Monday.
//! Dates carry no timezone, so bucketing does not depend on the host.

use chrono::{Days, NaiveDate, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::{ComplaintRecord, ComplaintTable, Field};
use crate::filter::FilteredView;

/// One label with its count, as shown on a bar or pie chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

/// Counts per label, remembering the order labels were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    counts: IndexMap<String, u64>,
}

impl AggregationResult {
    /// Count records per value of `field`
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a ComplaintRecord>, field: Field) -> Self {
        let mut counts = IndexMap::new();
        for record in records {
            *counts.entry(record.field(field).to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.counts.get(label).copied()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Labels in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Presentation order: count descending, ties in first-seen order
    pub fn sorted(&self) -> Vec<CategoryCount> {
        let mut out: Vec<CategoryCount> = self.counts.iter()
            .map(|(label, count)| CategoryCount { label: label.clone(), count: *count })
            .collect();
        // stable sort keeps first-seen order among equal counts
        out.sort_by(|a, b| b.count.cmp(&a.count));
        out
    }
}

/// Counts per value of `field` within the selection
pub fn count_by_category(view: &FilteredView<'_>, field: Field) -> AggregationResult {
    AggregationResult::tally(view.iter(), field)
}

/// Counts per value of `field` over the whole table, ignoring the selection
pub fn total_by_category(table: &ComplaintTable, field: Field) -> AggregationResult {
    AggregationResult::tally(table.iter(), field)
}

/// A node of a two-level breakdown (root → outer → inner)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub label: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Breakdown>,
}

impl Breakdown {
    /// Number of leaves below this node
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(Breakdown::leaf_count).sum()
        }
    }
}

fn sorted_nodes(counts: IndexMap<String, (u64, Vec<Breakdown>)>) -> Vec<Breakdown> {
    let mut nodes: Vec<Breakdown> = counts.into_iter()
        .map(|(label, (count, children))| Breakdown { label, count, children })
        .collect();
    nodes.sort_by(|a, b| b.count.cmp(&a.count));
    nodes
}

/// Two-level grouping, e.g. borough → complaint type for a sunburst.
///
/// The root is labelled with the view's key and counts the whole view;
/// each outer node counts its leaves.
pub fn hierarchical_breakdown(view: &FilteredView<'_>, outer: Field, inner: Field) -> Breakdown {
    let mut grouped: IndexMap<String, IndexMap<String, u64>> = IndexMap::new();
    for record in view.iter() {
        *grouped.entry(record.field(outer).to_string())
            .or_default()
            .entry(record.field(inner).to_string())
            .or_insert(0) += 1;
    }

    let outer_nodes: IndexMap<String, (u64, Vec<Breakdown>)> = grouped.into_iter()
        .map(|(label, leaves)| {
            let count: u64 = leaves.values().sum();
            let leaves = leaves.into_iter()
                .map(|(leaf, n)| (leaf, (n, Vec::new())))
                .collect();
            (label, (count, sorted_nodes(leaves)))
        })
        .collect();

    Breakdown {
        label: view.key().to_string(),
        count: view.len() as u64,
        children: sorted_nodes(outer_nodes),
    }
}

/// One point of the weekly trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPoint {
    /// Monday of the week
    pub week_start: NaiveDate,
    pub count: u64,
}

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Complaints per week, from the week of the earliest record to the week
/// of the latest one. Weeks without complaints are present with count 0.
pub fn weekly_trend(view: &FilteredView<'_>) -> Vec<WeekPoint> {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in view.iter() {
        *buckets.entry(week_start(record.created_date)).or_insert(0) += 1;
    }

    let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut points = Vec::new();
    let mut week = Some(first);
    while let Some(w) = week.filter(|w| *w <= last) {
        points.push(WeekPoint { week_start: w, count: buckets.get(&w).copied().unwrap_or(0) });
        week = w.checked_add_days(Days::new(7));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(zip: &str, kind: &str, borough: &str, date: NaiveDate) -> ComplaintRecord {
        ComplaintRecord::new(zip, kind, Some(borough), date)
    }

    fn table() -> ComplaintTable {
        ComplaintTable::new(vec![
            record("10001", "Illegal Parking", "MANHATTAN", ymd(2024, 1, 1)),
            record("10001", "Noise", "MANHATTAN", ymd(2024, 1, 3)),
            record("10001", "Noise", "MANHATTAN", ymd(2024, 1, 24)),
            record("10001", "Heat", "BROOKLYN", ymd(2024, 1, 7)),
            record("11201", "Noise", "BROOKLYN", ymd(2024, 1, 2)),
        ])
    }

    #[test]
    fn test_count_by_category_sorted() {
        let table = table();
        let view = filter(&table, "10001");
        let counts = count_by_category(&view, Field::ComplaintType);

        assert_eq!(counts.total(), view.len() as u64);
        let sorted = counts.sorted();
        assert_eq!(sorted[0], CategoryCount { label: "Noise".to_string(), count: 2 });
        // tie between Illegal Parking and Heat: first seen wins
        assert_eq!(sorted[1].label, "Illegal Parking");
        assert_eq!(sorted[2].label, "Heat");
    }

    #[test]
    fn test_total_by_category_ignores_selection() {
        let table = table();
        let boroughs = total_by_category(&table, Field::Borough);
        assert_eq!(boroughs.get("MANHATTAN"), Some(3));
        assert_eq!(boroughs.get("BROOKLYN"), Some(2));
        assert_eq!(boroughs.total(), table.len() as u64);
    }

    #[test]
    fn test_empty_view_aggregations() {
        let table = table();
        let view = filter(&table, "99999");
        assert!(count_by_category(&view, Field::ComplaintType).is_empty());
        assert!(weekly_trend(&view).is_empty());
        let tree = hierarchical_breakdown(&view, Field::Borough, Field::ComplaintType);
        assert_eq!(tree.count, 0);
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_hierarchical_breakdown_sums() {
        let table = table();
        let view = filter(&table, "10001");
        let tree = hierarchical_breakdown(&view, Field::Borough, Field::ComplaintType);

        assert_eq!(tree.label, "10001");
        assert_eq!(tree.count, 4);
        assert_eq!(tree.children.iter().map(|c| c.count).sum::<u64>(), tree.count);
        for borough in &tree.children {
            assert_eq!(borough.children.iter().map(|c| c.count).sum::<u64>(), borough.count);
        }
        assert_eq!(tree.children[0].label, "MANHATTAN");
        assert_eq!(tree.children[0].children[0].label, "Noise");
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-01-01 is a Monday
        assert_eq!(week_start(ymd(2024, 1, 1)), ymd(2024, 1, 1));
        assert_eq!(week_start(ymd(2024, 1, 7)), ymd(2024, 1, 1));
        assert_eq!(week_start(ymd(2024, 1, 8)), ymd(2024, 1, 8));
        assert_eq!(week_start(ymd(2023, 12, 31)), ymd(2023, 12, 25));
    }

    #[test]
    fn test_weekly_trend_fills_gaps() {
        let table = table();
        let view = filter(&table, "10001");
        let trend = weekly_trend(&view);

        let weeks: Vec<NaiveDate> = trend.iter().map(|p| p.week_start).collect();
        assert_eq!(weeks, vec![ymd(2024, 1, 1), ymd(2024, 1, 8), ymd(2024, 1, 15), ymd(2024, 1, 22)]);
        let counts: Vec<u64> = trend.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![3, 0, 0, 1]);
        assert_eq!(counts.iter().sum::<u64>(), view.len() as u64);
    }
}
