//! Derived views over a slice of crime records.
//!
//! Every function is deterministic. Rankings use stable sorts, so records
//! (or groups, in order of first appearance) with equal values keep their
//! relative order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crime_insights_analytics_models::{
    CategoryTotal, ClusterProfile, ClusterScatter, ClusterSummary, OTHER_BUCKET, ProportionRow,
    ProportionSeries, RankedEntry, RateMatrix, ScatterPoint, StateRates, StateShare, TrendRow,
    TrendSeries, YearlyTotal,
};
use crime_insights_crime_models::{ClusterId, CrimeRecord, Metric};

/// Length of the top-N bar charts.
pub const TOP_N: usize = 10;

/// Number of crime heads tracked by the trend and proportion series.
pub const TREND_CATEGORIES: usize = 5;

/// Number of states and crime heads listed in a cluster profile.
pub const PROFILE_TOP: usize = 3;

/// Number of slices in the clustered-state distribution.
pub const DISTRIBUTION_TOP: usize = 6;

/// Cluster labels counted by [`clustered_state_distribution`].
const HIGHER_RISK_CLUSTERS: std::ops::RangeInclusive<ClusterId> = 1..=4;

/// Accumulates `(key, value)` pairs into per-key sums, keeping keys in
/// order of first appearance.
fn sum_in_order<'a>(pairs: impl Iterator<Item = (&'a str, u64)>) -> Vec<(String, u64)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut sums: Vec<(String, u64)> = Vec::new();

    for (key, value) in pairs {
        if let Some(&i) = index.get(key) {
            sums[i].1 += value;
        } else {
            index.insert(key, sums.len());
            sums.push((key.to_string(), value));
        }
    }

    sums
}

/// Stable descending sort by count, truncated to `n`.
fn top_by_count(mut sums: Vec<(String, u64)>, n: usize) -> Vec<(String, u64)> {
    sums.sort_by(|a, b| b.1.cmp(&a.1));
    sums.truncate(n);
    sums
}

fn category_rows(records: &[CrimeRecord]) -> impl Iterator<Item = &CrimeRecord> {
    records.iter().filter(|r| !r.is_total())
}

fn total_rows(records: &[CrimeRecord]) -> impl Iterator<Item = &CrimeRecord> {
    records.iter().filter(|r| r.is_total())
}

/// Descending order over floats with NaN ranked below every number.
fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Sums total-crime-head incidents per year across every state, ascending
/// by year.
#[must_use]
pub fn yearly_totals(records: &[CrimeRecord]) -> Vec<YearlyTotal> {
    let mut totals: BTreeMap<i32, u64> = BTreeMap::new();

    for r in total_rows(records) {
        *totals.entry(r.year).or_default() += r.number_of_incidences;
    }

    totals
        .into_iter()
        .map(|(year, total)| YearlyTotal { year, total })
        .collect()
}

/// The ten states with the highest `metric` in `year`, based on
/// total-crime-head rows.
///
/// The result is in ascending order (largest last) so a horizontal bar
/// chart draws the largest bar at the top. NaN values rank below every
/// number.
#[must_use]
pub fn top_states(records: &[CrimeRecord], year: i32, metric: Metric) -> Vec<RankedEntry> {
    let mut rows: Vec<&CrimeRecord> = total_rows(records).filter(|r| r.year == year).collect();

    rows.sort_by(|a, b| descending_nan_last(metric.value(a), metric.value(b)));

    rows.into_iter()
        .take(TOP_N)
        .map(|r| RankedEntry {
            name: r.state.clone(),
            value: metric.value(r),
        })
        .rev()
        .collect()
}

/// The ten crime heads with the most incidents over all years, in
/// ascending display order. The total crime head is never included.
#[must_use]
pub fn category_ranking(records: &[CrimeRecord]) -> Vec<CategoryTotal> {
    let sums = sum_in_order(
        category_rows(records).map(|r| (r.crime_head.as_str(), r.number_of_incidences)),
    );

    top_by_count(sums, TOP_N)
        .into_iter()
        .map(|(name, total)| CategoryTotal { name, total })
        .rev()
        .collect()
}

/// Average incidents and crime rate per cluster, over total-crime-head rows.
///
/// Unlabelled rows are skipped; a cluster with no rows does not appear.
#[must_use]
pub fn cluster_summary(records: &[CrimeRecord]) -> Vec<ClusterSummary> {
    let mut groups: BTreeMap<ClusterId, (u64, f64, usize)> = BTreeMap::new();

    for r in total_rows(records) {
        let Some(cluster) = r.cluster_label else {
            continue;
        };
        let entry = groups.entry(cluster).or_default();
        entry.0 += r.number_of_incidences;
        entry.1 += r.crime_rate_per_lakh_population;
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|(cluster, (incidents, rate, count))| {
            #[allow(clippy::cast_precision_loss)]
            let incidents = incidents as f64;
            ClusterSummary {
                cluster,
                name: format!("Cluster {cluster}"),
                avg_incidents: mean(incidents, count),
                avg_crime_rate: mean(rate, count),
                count,
            }
        })
        .collect()
}

/// The `n` non-total crime heads with the most incidents over all years,
/// most first.
#[must_use]
pub fn top_categories(records: &[CrimeRecord], n: usize) -> Vec<String> {
    let sums = sum_in_order(
        category_rows(records).map(|r| (r.crime_head.as_str(), r.number_of_incidences)),
    );

    top_by_count(sums, n).into_iter().map(|(name, _)| name).collect()
}

/// Yearly incidents for the five biggest crime heads.
#[must_use]
pub fn trend_series(records: &[CrimeRecord]) -> TrendSeries {
    let categories = top_categories(records, TREND_CATEGORIES);
    let mut years: BTreeMap<i32, BTreeMap<String, u64>> = BTreeMap::new();

    for r in category_rows(records).filter(|r| categories.contains(&r.crime_head)) {
        *years
            .entry(r.year)
            .or_default()
            .entry(r.crime_head.clone())
            .or_default() += r.number_of_incidences;
    }

    TrendSeries {
        categories,
        rows: years
            .into_iter()
            .map(|(year, values)| TrendRow { year, values })
            .collect(),
    }
}

/// Each year's split of non-total incidents between the five biggest crime
/// heads and an "Other" bucket, as percentages.
///
/// A year whose incidents sum to zero reports 0% for every bucket present.
#[must_use]
pub fn proportion_series(records: &[CrimeRecord]) -> ProportionSeries {
    let top = top_categories(records, TREND_CATEGORIES);
    let mut years: BTreeMap<i32, BTreeMap<String, u64>> = BTreeMap::new();

    for r in category_rows(records) {
        let bucket = if top.contains(&r.crime_head) {
            r.crime_head.clone()
        } else {
            OTHER_BUCKET.to_string()
        };
        *years.entry(r.year).or_default().entry(bucket).or_default() += r.number_of_incidences;
    }

    let rows = years
        .into_iter()
        .map(|(year, counts)| {
            let total: u64 = counts.values().sum();
            #[allow(clippy::cast_precision_loss)]
            let percentages = counts
                .into_iter()
                .map(|(bucket, count)| {
                    let pct = if total == 0 {
                        0.0
                    } else {
                        count as f64 / total as f64 * 100.0
                    };
                    (bucket, pct)
                })
                .collect();
            ProportionRow { year, percentages }
        })
        .collect();

    let mut categories = top;
    categories.push(OTHER_BUCKET.to_string());

    ProportionSeries { categories, rows }
}

/// Crime rate per state and year from total-crime-head rows, excluding the
/// national aggregate.
///
/// States are listed in order of first appearance. When a state has more
/// than one row for a year, the last one wins.
#[must_use]
pub fn rate_matrix(records: &[CrimeRecord]) -> RateMatrix {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<StateRates> = Vec::new();
    let mut years = BTreeSet::new();

    for r in total_rows(records).filter(|r| !r.is_aggregate_state()) {
        let i = *index.entry(r.state.as_str()).or_insert_with(|| {
            rows.push(StateRates {
                state: r.state.clone(),
                rates: BTreeMap::new(),
            });
            rows.len() - 1
        });
        rows[i].rates.insert(r.year, r.crime_rate_per_lakh_population);
        years.insert(r.year);
    }

    RateMatrix {
        years: years.into_iter().collect(),
        rows,
    }
}

/// Profile of one cluster over every record carrying its label.
///
/// Returns `None` when no record carries the label.
#[must_use]
pub fn cluster_profile(records: &[CrimeRecord], cluster: ClusterId) -> Option<ClusterProfile> {
    let rows: Vec<&CrimeRecord> = records
        .iter()
        .filter(|r| r.cluster_label == Some(cluster))
        .collect();

    if rows.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let incidents: f64 = rows.iter().map(|r| r.number_of_incidences as f64).sum();
    let rate: f64 = rows.iter().map(|r| r.crime_rate_per_lakh_population).sum();

    let state_counts = sum_in_order(rows.iter().map(|r| (r.state.as_str(), 1)));
    let crime_counts = sum_in_order(
        rows.iter()
            .filter(|r| !r.is_total())
            .map(|r| (r.crime_head.as_str(), r.number_of_incidences)),
    );

    Some(ClusterProfile {
        cluster,
        avg_incidents: mean(incidents, rows.len()),
        avg_crime_rate: mean(rate, rows.len()),
        top_states: top_by_count(state_counts, PROFILE_TOP)
            .into_iter()
            .map(|(name, _)| name)
            .collect(),
        top_crime_types: top_by_count(crime_counts, PROFILE_TOP)
            .into_iter()
            .map(|(name, _)| name)
            .collect(),
    })
}

/// Profiles for every cluster label present, keyed by id.
#[must_use]
pub fn cluster_profiles(records: &[CrimeRecord]) -> BTreeMap<ClusterId, ClusterProfile> {
    records
        .iter()
        .filter_map(|r| r.cluster_label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter_map(|id| cluster_profile(records, id).map(|p| (id, p)))
        .collect()
}

/// Total-crime-head rows grouped by cluster for the incidents/rate scatter.
#[must_use]
pub fn cluster_scatter(records: &[CrimeRecord]) -> Vec<ClusterScatter> {
    let mut groups: BTreeMap<ClusterId, Vec<ScatterPoint>> = BTreeMap::new();

    for r in total_rows(records) {
        let Some(cluster) = r.cluster_label else {
            continue;
        };
        groups.entry(cluster).or_default().push(ScatterPoint {
            state: r.state.clone(),
            year: r.year,
            incidents: r.number_of_incidences,
            crime_rate: r.crime_rate_per_lakh_population,
        });
    }

    groups
        .into_iter()
        .map(|(cluster, points)| ClusterScatter { cluster, points })
        .collect()
}

/// The six states with the most rows in clusters 1 through 4.
#[must_use]
pub fn clustered_state_distribution(records: &[CrimeRecord]) -> Vec<StateShare> {
    let counts = sum_in_order(
        records
            .iter()
            .filter(|r| {
                r.cluster_label
                    .is_some_and(|c| HIGHER_RISK_CLUSTERS.contains(&c))
            })
            .map(|r| (r.state.as_str(), 1)),
    );

    top_by_count(counts, DISTRIBUTION_TOP)
        .into_iter()
        .map(|(state, count)| StateShare { state, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use crime_insights_crime_models::{AGGREGATE_STATE, TOTAL_CRIME_HEAD};

    use super::*;

    fn rec(
        year: i32,
        state: &str,
        crime_head: &str,
        incidents: u64,
        rate: f64,
        cluster: Option<ClusterId>,
    ) -> CrimeRecord {
        CrimeRecord {
            year,
            state: state.to_string(),
            crime_head: crime_head.to_string(),
            number_of_incidences: incidents,
            number_of_senior_citizen_victims: incidents + 5,
            crime_rate_per_lakh_population: rate,
            cluster_label: cluster,
        }
    }

    fn total(year: i32, state: &str, incidents: u64, rate: f64, cluster: Option<ClusterId>) -> CrimeRecord {
        rec(year, state, TOTAL_CRIME_HEAD, incidents, rate, cluster)
    }

    #[test]
    fn yearly_totals_example() {
        let records = vec![
            total(2020, "X", 100, 1.0, None),
            total(2021, "X", 150, 1.0, None),
        ];
        assert_eq!(
            yearly_totals(&records),
            vec![
                YearlyTotal { year: 2020, total: 100 },
                YearlyTotal { year: 2021, total: 150 },
            ]
        );
    }

    #[test]
    fn yearly_totals_ignore_category_rows_and_sort() {
        let records = vec![
            total(2022, "A", 10, 1.0, None),
            rec(2022, "A", "Robbery", 999, 1.0, None),
            total(2018, "B", 5, 1.0, None),
            total(2022, "B", 7, 1.0, None),
            total(2022, "B", 7, 1.0, None),
        ];
        let totals = yearly_totals(&records);
        assert_eq!(totals.len(), 2);
        assert!(totals.windows(2).all(|w| w[0].year < w[1].year));
        assert_eq!(totals[1], YearlyTotal { year: 2022, total: 24 });
    }

    #[test]
    fn empty_input_gives_empty_views() {
        assert!(yearly_totals(&[]).is_empty());
        assert!(top_states(&[], 2022, Metric::Incidents).is_empty());
        assert!(category_ranking(&[]).is_empty());
        assert!(cluster_summary(&[]).is_empty());
        assert_eq!(trend_series(&[]), TrendSeries::default());
        assert!(proportion_series(&[]).rows.is_empty());
        assert_eq!(rate_matrix(&[]), RateMatrix::default());
        assert!(cluster_profile(&[], 1).is_none());
        assert!(cluster_profiles(&[]).is_empty());
        assert!(cluster_scatter(&[]).is_empty());
        assert!(clustered_state_distribution(&[]).is_empty());
    }

    #[test]
    fn top_states_caps_at_ten_and_reverses() {
        let records: Vec<CrimeRecord> = (0..15u64)
            .map(|i| total(2022, &format!("S{i}"), i * 10, 15.0 - f64::from(u32::try_from(i).unwrap()), None))
            .chain(std::iter::once(total(2021, "Old", 10_000, 99.0, None)))
            .collect();

        let ranked = top_states(&records, 2022, Metric::Incidents);
        assert_eq!(ranked.len(), TOP_N);
        assert!(ranked.windows(2).all(|w| w[0].value <= w[1].value));
        assert_eq!(ranked.last().unwrap().name, "S14");
        assert_eq!(ranked.first().unwrap().name, "S5");
        assert!(!ranked.iter().any(|e| e.name == "Old"));

        let min_included = ranked.first().unwrap().value;
        for r in records.iter().filter(|r| r.year == 2022) {
            if !ranked.iter().any(|e| e.name == r.state) {
                assert!(Metric::Incidents.value(r) <= min_included);
            }
        }

        let by_rate = top_states(&records, 2022, Metric::CrimeRate);
        assert_eq!(by_rate.last().unwrap().name, "S0");
        assert!((by_rate.last().unwrap().value - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn top_states_ties_keep_record_order() {
        let records = vec![
            total(2022, "First", 50, 1.0, None),
            total(2022, "Second", 50, 1.0, None),
            total(2022, "Third", 70, 1.0, None),
        ];
        let names: Vec<String> = top_states(&records, 2022, Metric::Incidents)
            .into_iter()
            .map(|e| e.name)
            .collect();
        // Descending is Third, First, Second; display order is reversed.
        assert_eq!(names, vec!["Second", "First", "Third"]);
    }

    #[test]
    fn top_states_ranks_nan_rates_last() {
        let records: Vec<CrimeRecord> = (0..40u32)
            .map(|i| {
                let rate = if i % 3 == 0 { f64::NAN } else { f64::from(i) };
                total(2022, &format!("S{i}"), u64::from(i), rate, None)
            })
            .collect();

        let ranked = top_states(&records, 2022, Metric::CrimeRate);
        assert_eq!(ranked.len(), TOP_N);
        assert!(ranked.iter().all(|e| !e.value.is_nan()));
        assert!(ranked.windows(2).all(|w| w[0].value <= w[1].value));
        assert_eq!(ranked.last().unwrap().name, "S38");
        assert_eq!(ranked.first().unwrap().name, "S25");
    }

    #[test]
    fn top_states_all_nan_keeps_record_order() {
        let records: Vec<CrimeRecord> = (0..25u32)
            .map(|i| total(2022, &format!("S{i}"), 1, f64::NAN, None))
            .collect();

        let ranked = top_states(&records, 2022, Metric::CrimeRate);
        assert_eq!(ranked.len(), TOP_N);
        assert!(ranked.iter().all(|e| e.value.is_nan()));
        assert_eq!(ranked.first().unwrap().name, "S9");
        assert_eq!(ranked.last().unwrap().name, "S0");
    }

    #[test]
    fn nan_rates_propagate_through_views() {
        let records = vec![
            total(2021, "Goa", 10, f64::NAN, Some(1)),
            total(2022, "Goa", 20, 2.0, Some(1)),
            total(2022, "Assam", 30, 1.0, Some(2)),
        ];

        let summary = cluster_summary(&records);
        assert!(summary[0].avg_crime_rate.is_nan());
        assert!((summary[0].avg_incidents - 15.0).abs() < f64::EPSILON);
        assert!((summary[1].avg_crime_rate - 1.0).abs() < f64::EPSILON);

        let matrix = rate_matrix(&records);
        assert!(matrix.rows[0].rate(2021).is_nan());
        assert!((matrix.rows[0].rate(2022) - 2.0).abs() < f64::EPSILON);

        let profile = cluster_profile(&records, 1).unwrap();
        assert!(profile.avg_crime_rate.is_nan());
        assert!((profile.avg_incidents - 15.0).abs() < f64::EPSILON);

        let ranked = top_states(&records, 2021, Metric::CrimeRate);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].value.is_nan());
    }

    #[test]
    fn top_states_only_uses_total_rows() {
        let records = vec![
            rec(2022, "Goa", "Robbery", 500, 1.0, None),
            total(2022, "Goa", 20, 1.0, None),
        ];
        let ranked = top_states(&records, 2022, Metric::Incidents);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].value - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn category_ranking_excludes_total_head() {
        let mut records = vec![total(2022, "A", 1_000_000, 1.0, None)];
        for i in 0..12u64 {
            records.push(rec(2022, "A", &format!("Crime {i}"), i + 1, 0.1, None));
            records.push(rec(2021, "B", &format!("Crime {i}"), i + 1, 0.1, None));
        }

        let ranking = category_ranking(&records);
        assert_eq!(ranking.len(), TOP_N);
        assert!(!ranking.iter().any(|c| c.name == TOTAL_CRIME_HEAD));
        assert_eq!(ranking.last().unwrap().name, "Crime 11");
        assert_eq!(ranking.last().unwrap().total, 24);
        assert!(ranking.windows(2).all(|w| w[0].total <= w[1].total));
    }

    #[test]
    fn cluster_summary_means_over_labelled_total_rows() {
        let records = vec![
            total(2020, "A", 100, 2.0, Some(1)),
            total(2021, "B", 300, 4.0, Some(1)),
            total(2021, "C", 50, 9.0, Some(3)),
            total(2021, "D", 7_000, 9.0, None),
            rec(2021, "A", "Robbery", 9_999, 50.0, Some(1)),
        ];

        let summary = cluster_summary(&records);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].cluster, 1);
        assert_eq!(summary[0].name, "Cluster 1");
        assert_eq!(summary[0].count, 2);
        assert!((summary[0].avg_incidents - 200.0).abs() < f64::EPSILON);
        assert!((summary[0].avg_crime_rate - 3.0).abs() < f64::EPSILON);
        assert_eq!(summary[1].cluster, 3);
        assert!(!summary.iter().any(|s| s.cluster == 2));
    }

    #[test]
    fn trend_series_leaves_missing_years_absent() {
        let records = vec![
            rec(2020, "A", "Theft", 50, 0.1, None),
            rec(2021, "A", "Theft", 60, 0.1, None),
            rec(2021, "B", "Theft", 5, 0.1, None),
            rec(2021, "A", "Robbery", 40, 0.1, None),
            total(2021, "A", 9_000, 1.0, None),
        ];

        let series = trend_series(&records);
        assert_eq!(series.categories, vec!["Theft", "Robbery"]);
        assert_eq!(series.rows.len(), 2);
        assert_eq!(series.rows[0].year, 2020);
        assert_eq!(series.rows[0].values.get("Theft"), Some(&50));
        assert!(!series.rows[0].values.contains_key("Robbery"));
        assert_eq!(series.rows[1].values.get("Theft"), Some(&65));
        assert_eq!(series.rows[1].values.get("Robbery"), Some(&40));
    }

    #[test]
    fn trend_series_keeps_five_categories() {
        let records: Vec<CrimeRecord> = (0..8u64)
            .map(|i| rec(2022, "A", &format!("C{i}"), 100 - i, 0.1, None))
            .collect();
        let series = trend_series(&records);
        assert_eq!(series.categories, vec!["C0", "C1", "C2", "C3", "C4"]);
        assert_eq!(series.rows[0].values.len(), 5);
    }

    #[test]
    fn proportions_sum_to_one_hundred() {
        let mut records = vec![total(2020, "A", 5_000, 1.0, None)];
        for (i, year) in [2019, 2020, 2021].into_iter().enumerate() {
            for c in 0..8u64 {
                let n = (c + 1) * 17 + u64::try_from(i).unwrap() * 3;
                records.push(rec(year, "A", &format!("C{c}"), n, 0.1, None));
            }
        }

        let series = proportion_series(&records);
        assert_eq!(series.categories.len(), TREND_CATEGORIES + 1);
        assert_eq!(series.categories.last().unwrap(), OTHER_BUCKET);
        assert_eq!(series.rows.len(), 3);
        for row in &series.rows {
            assert!((row.total_percentage() - 100.0).abs() <= 0.01, "{row:?}");
            assert!(row.percentages.contains_key(OTHER_BUCKET));
        }
    }

    #[test]
    fn proportions_with_zero_total_are_zero() {
        let records = vec![rec(2020, "A", "Theft", 0, 0.0, None)];
        let series = proportion_series(&records);
        assert_eq!(series.rows.len(), 1);
        assert!(series.rows[0].percentages.values().all(|p| p.abs() < f64::EPSILON));
    }

    #[test]
    fn rate_matrix_excludes_aggregate_state() {
        let records = vec![
            total(2021, "Haryana", 1_500, 15.5, Some(3)),
            total(2022, "Delhi", 900, 115.0, Some(2)),
            total(2022, AGGREGATE_STATE, 28_500, 26.0, Some(4)),
            total(2022, "Haryana", 1_400, 12.0, Some(3)),
            rec(2022, "Delhi", "Robbery", 40, 3.0, Some(2)),
        ];

        let matrix = rate_matrix(&records);
        assert_eq!(matrix.years, vec![2021, 2022]);
        let states: Vec<&str> = matrix.rows.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, vec!["Haryana", "Delhi"]);
        assert!((matrix.rows[0].rate(2021) - 15.5).abs() < f64::EPSILON);
        assert!((matrix.rows[1].rate(2022) - 115.0).abs() < f64::EPSILON);
        assert!(matrix.rows[1].rate(2021).abs() < f64::EPSILON);
    }

    #[test]
    fn cluster_profile_example() {
        let records = vec![
            rec(2020, "A", "Theft", 10, 1.0, Some(1)),
            rec(2021, "B", "Robbery", 20, 3.0, Some(1)),
            rec(2021, "C", "Robbery", 500, 3.0, Some(2)),
        ];
        let profile = cluster_profile(&records, 1).unwrap();
        assert!((profile.avg_incidents - 15.0).abs() < f64::EPSILON);
        assert!((profile.avg_crime_rate - 2.0).abs() < f64::EPSILON);
        assert!(cluster_profile(&records, 7).is_none());
    }

    #[test]
    fn cluster_profile_top_lists() {
        let records = vec![
            total(2020, "Goa", 100, 1.0, Some(2)),
            total(2021, "Goa", 100, 1.0, Some(2)),
            total(2021, "Kerala", 100, 1.0, Some(2)),
            total(2021, "Assam", 100, 1.0, Some(2)),
            total(2022, "Assam", 100, 1.0, Some(2)),
            total(2022, "Bihar", 100, 1.0, Some(2)),
            rec(2022, "Bihar", "Theft", 30, 1.0, Some(2)),
            rec(2022, "Bihar", "Robbery", 50, 1.0, Some(2)),
            rec(2022, "Bihar", "Murder", 5, 1.0, Some(2)),
            rec(2022, "Bihar", "Trespass", 20, 1.0, Some(2)),
        ];

        let profile = cluster_profile(&records, 2).unwrap();
        assert_eq!(profile.top_states, vec!["Bihar", "Goa", "Assam"]);
        assert_eq!(profile.top_crime_types, vec!["Robbery", "Theft", "Trespass"]);
        assert!(!profile.top_crime_types.iter().any(|c| c == TOTAL_CRIME_HEAD));
    }

    #[test]
    fn cluster_profiles_cover_every_label() {
        let records = vec![
            total(2020, "A", 10, 1.0, Some(0)),
            total(2020, "B", 10, 1.0, Some(4)),
            total(2020, "C", 10, 1.0, None),
        ];
        let profiles = cluster_profiles(&records);
        assert_eq!(profiles.keys().copied().collect::<Vec<_>>(), vec![0, 4]);
    }

    #[test]
    fn scatter_groups_total_rows_by_cluster() {
        let records = vec![
            total(2020, "Kerala", 800, 80.0, Some(2)),
            total(2021, "Gujarat", 3_000, 40.0, Some(3)),
            total(2022, "Delhi", 900, 115.0, Some(2)),
            rec(2022, "Delhi", "Robbery", 40, 3.0, Some(2)),
            total(2022, "Goa", 20, 1.0, None),
        ];
        let scatter = cluster_scatter(&records);
        assert_eq!(scatter.len(), 2);
        assert_eq!(scatter[0].cluster, 2);
        assert_eq!(scatter[0].points.len(), 2);
        assert_eq!(scatter[0].points[1].state, "Delhi");
        assert_eq!(scatter[1].points[0].incidents, 3_000);
    }

    #[test]
    fn distribution_counts_higher_risk_clusters_only() {
        let mut records = vec![
            total(2020, "Zero", 1, 1.0, Some(0)),
            total(2021, "Zero", 1, 1.0, Some(0)),
            total(2020, "None", 1, 1.0, None),
        ];
        for (i, state) in ["A", "B", "C", "D", "E", "F", "G"].into_iter().enumerate() {
            for _ in 0..=i {
                records.push(total(2020, state, 1, 1.0, Some(1 + u32::try_from(i % 4).unwrap())));
            }
        }

        let dist = clustered_state_distribution(&records);
        assert_eq!(dist.len(), DISTRIBUTION_TOP);
        assert_eq!(dist[0], StateShare { state: "G".to_string(), count: 7 });
        assert!(!dist.iter().any(|s| s.state == "Zero" || s.state == "None" || s.state == "A"));
    }
}
