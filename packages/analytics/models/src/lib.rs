#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived view types for the crime-insights dashboards.
//!
//! Every type here is the output of one aggregation in
//! `crime_insights_analytics`. They serialize to camelCase JSON so they can
//! be handed straight to a charting front end.

use std::collections::BTreeMap;

use crime_insights_crime_models::ClusterId;
use serde::{Deserialize, Serialize};

/// Name of the residual bucket in the category proportion series.
pub const OTHER_BUCKET: &str = "Other";

/// Total incidents for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTotal {
    /// Calendar year.
    pub year: i32,
    /// Summed incidents across every total-crime-head row in that year.
    pub total: u64,
}

/// One bar of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    /// State name.
    pub name: String,
    /// Value of the metric the ranking was ordered by.
    pub value: f64,
}

/// Summed incidents for one crime head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Crime head.
    pub name: String,
    /// Summed incidents.
    pub total: u64,
}

/// Averages over the total-crime-head rows carrying one cluster label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// Cluster id.
    pub cluster: ClusterId,
    /// Display name, e.g. `"Cluster 3"`.
    pub name: String,
    /// Mean incidents.
    pub avg_incidents: f64,
    /// Mean crime rate per lakh population.
    pub avg_crime_rate: f64,
    /// Number of rows averaged.
    pub count: usize,
}

/// Narrative input for one cluster: averages over every record carrying
/// the label, plus its dominant states and crime heads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterProfile {
    /// Cluster id.
    pub cluster: ClusterId,
    /// Mean incidents.
    pub avg_incidents: f64,
    /// Mean crime rate per lakh population.
    pub avg_crime_rate: f64,
    /// Up to three states with the most rows in the cluster.
    pub top_states: Vec<String>,
    /// Up to three non-total crime heads with the most incidents.
    pub top_crime_types: Vec<String>,
}

/// A single total-crime-head row plotted on the incidents/rate scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// State name.
    pub state: String,
    /// Calendar year.
    pub year: i32,
    /// Incidents.
    pub incidents: u64,
    /// Crime rate per lakh population.
    pub crime_rate: f64,
}

/// All scatter points for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterScatter {
    /// Cluster id.
    pub cluster: ClusterId,
    /// Points, in record order.
    pub points: Vec<ScatterPoint>,
}

/// Row count for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateShare {
    /// State name.
    pub state: String,
    /// Number of rows.
    pub count: u64,
}

/// Yearly incidents for the top crime heads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    /// The top crime heads, most incidents first.
    pub categories: Vec<String>,
    /// One row per year, ascending.
    pub rows: Vec<TrendRow>,
}

/// One year of a [`TrendSeries`].
///
/// A category with no rows in this year is absent from `values`, not zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    /// Calendar year.
    pub year: i32,
    /// Summed incidents per crime head.
    pub values: BTreeMap<String, u64>,
}

/// Yearly share of incidents held by each top crime head and
/// [`OTHER_BUCKET`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProportionSeries {
    /// The top crime heads followed by [`OTHER_BUCKET`].
    pub categories: Vec<String>,
    /// One row per year, ascending.
    pub rows: Vec<ProportionRow>,
}

/// One year of a [`ProportionSeries`]. Percentages sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProportionRow {
    /// Calendar year.
    pub year: i32,
    /// Percentage of the year's non-total incidents per bucket.
    pub percentages: BTreeMap<String, f64>,
}

impl ProportionRow {
    /// Sum of every bucket's percentage.
    #[must_use]
    pub fn total_percentage(&self) -> f64 {
        self.percentages.values().sum()
    }
}

/// Crime rate per year for every state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateMatrix {
    /// Every year that appears in any row, ascending.
    pub years: Vec<i32>,
    /// One row per state, in order of first appearance.
    pub rows: Vec<StateRates>,
}

/// One state's row of a [`RateMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRates {
    /// State name.
    pub state: String,
    /// Crime rate keyed by year.
    pub rates: BTreeMap<i32, f64>,
}

impl StateRates {
    /// Rate for `year`, or `0.0` when the state has no row for it.
    #[must_use]
    pub fn rate(&self, year: i32) -> f64 {
        self.rates.get(&year).copied().unwrap_or(0.0)
    }

    /// Heat colour for `year`.
    #[must_use]
    pub fn color(&self, year: i32) -> HeatColor {
        HeatColor::for_rate(self.rate(year))
    }
}

/// HSL colour on a green (low) to red (high) ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatColor {
    /// Hue in degrees, 120 (green) down to 0 (red).
    pub hue: f64,
    /// Saturation percentage.
    pub saturation: u8,
    /// Lightness percentage.
    pub lightness: u8,
}

impl HeatColor {
    /// Maps a crime rate onto the ramp: hue falls by 6 degrees per unit of
    /// rate and bottoms out at 0.
    #[must_use]
    pub fn for_rate(rate: f64) -> Self {
        Self {
            hue: (120.0 - rate * 6.0).max(0.0),
            saturation: 70,
            lightness: 60,
        }
    }
}

impl std::fmt::Display for HeatColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_color_ramp() {
        assert!((HeatColor::for_rate(0.0).hue - 120.0).abs() < f64::EPSILON);
        assert!((HeatColor::for_rate(10.0).hue - 60.0).abs() < f64::EPSILON);
        assert!(HeatColor::for_rate(115.0).hue.abs() < f64::EPSILON);
        assert_eq!(HeatColor::for_rate(5.0).to_string(), "hsl(90, 70%, 60%)");
    }

    #[test]
    fn missing_year_rates_as_zero() {
        let row = StateRates {
            state: "Haryana".to_string(),
            rates: BTreeMap::from([(2021, 15.5)]),
        };
        assert!((row.rate(2021) - 15.5).abs() < f64::EPSILON);
        assert!(row.rate(2016).abs() < f64::EPSILON);
        assert!((row.color(2016).hue - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn views_serialize_camel_case() {
        let summary = ClusterSummary {
            cluster: 2,
            name: "Cluster 2".to_string(),
            avg_incidents: 850.0,
            avg_crime_rate: 97.5,
            count: 2,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["avgIncidents"], 850.0);
        assert_eq!(json["avgCrimeRate"], 97.5);
    }
}
