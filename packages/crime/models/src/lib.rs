#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime record types and reserved category names.
//!
//! This crate defines the canonical record shape for the senior-citizen
//! crime statistics used across the whole crime-insights system. Every
//! derived view and every insight prompt starts from a slice of
//! [`CrimeRecord`] values.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The reserved crime head carrying the all-categories total for a
/// state/year. Never summed together with the category-specific rows.
pub const TOTAL_CRIME_HEAD: &str = "Total Crimes against Senior Citizen";

/// The aggregate pseudo-state that sums every state for a year.
pub const AGGREGATE_STATE: &str = "All India";

/// Pre-assigned cluster id. Labels are produced outside this system and
/// are treated as opaque input.
pub type ClusterId = u32;

/// A single row of crime statistics for one state, year and crime head.
///
/// Records are immutable once loaded. Duplicates across
/// `(year, state, crime_head)` are legal and simply accumulate in sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeRecord {
    /// Calendar year of the statistic.
    pub year: i32,
    /// State name, or [`AGGREGATE_STATE`] for the national rollup.
    pub state: String,
    /// Crime category, or [`TOTAL_CRIME_HEAD`] for the per-state total.
    pub crime_head: String,
    /// Number of reported incidents.
    pub number_of_incidences: u64,
    /// Number of senior-citizen victims (usually >= incidents).
    pub number_of_senior_citizen_victims: u64,
    /// Crimes per 100,000 population.
    pub crime_rate_per_lakh_population: f64,
    /// Pre-assigned cluster id; `None` means unclustered.
    #[serde(default)]
    pub cluster_label: Option<ClusterId>,
}

impl CrimeRecord {
    /// Whether this is the all-categories total row for its state/year.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.crime_head == TOTAL_CRIME_HEAD
    }

    /// Whether this record belongs to the national aggregate pseudo-state.
    #[must_use]
    pub fn is_aggregate_state(&self) -> bool {
        self.state == AGGREGATE_STATE
    }
}

/// Numeric field a ranking can be ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Metric {
    /// `number_of_incidences`
    #[default]
    Incidents,
    /// `crime_rate_per_lakh_population`
    CrimeRate,
}

impl Metric {
    /// Both metrics, in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Incidents, Self::CrimeRate]
    }

    /// Reads this metric off a record.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self, record: &CrimeRecord) -> f64 {
        match self {
            Self::Incidents => record.number_of_incidences as f64,
            Self::CrimeRate => record.crime_rate_per_lakh_population,
        }
    }

    /// Column label used by charts and tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Incidents => "Total Incidents",
            Self::CrimeRate => "Crime Rate",
        }
    }
}
