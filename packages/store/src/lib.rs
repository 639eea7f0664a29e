#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static, in-memory store of crime records.
//!
//! The store is populated once at startup, either from the CSV dataset
//! baked into the binary at compile time or from a CSV file on disk, and
//! is never mutated afterwards. Every derived view is computed from
//! [`RecordStore::records`].

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crime_insights_crime_models::{ClusterId, CrimeRecord};
use thiserror::Error;

/// Sample dataset embedded at compile time.
const EMBEDDED_CSV: &str = include_str!("../data/senior_citizen_crimes.csv");

/// Errors that can occur while loading records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the data file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSV row could not be parsed into a record.
    #[error("CSV error at line {line}: {source}")]
    Csv {
        /// 1-based line number of the offending row (0 if unknown).
        line: u64,
        /// Underlying parser error.
        source: csv::Error,
    },
}

impl From<csv::Error> for StoreError {
    fn from(source: csv::Error) -> Self {
        let line = source.position().map_or(0, csv::Position::line);
        Self::Csv { line, source }
    }
}

/// Immutable collection of [`CrimeRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<CrimeRecord>,
}

impl RecordStore {
    /// Wraps an already-loaded set of records.
    #[must_use]
    pub const fn from_records(records: Vec<CrimeRecord>) -> Self {
        Self { records }
    }

    /// Loads the sample dataset compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Csv`] if the embedded file is malformed.
    pub fn embedded() -> Result<Self, StoreError> {
        Self::from_reader(EMBEDDED_CSV.as_bytes())
    }

    /// Loads records from a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be opened or a row fails
    /// to parse.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        log::info!("Loading crime records from {}", path.display());
        Self::from_reader(File::open(path)?)
    }

    /// Loads records from any CSV source with a header row.
    ///
    /// An empty `cluster_label` cell means the record is unclustered.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Csv`] on the first row that fails to parse.
    pub fn from_reader(reader: impl Read) -> Result<Self, StoreError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = rdr
            .deserialize::<CrimeRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Loaded {} crime records", records.len());

        Ok(Self { records })
    }

    /// All records, in load order.
    #[must_use]
    pub fn records(&self) -> &[CrimeRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct state names, excluding the national aggregate, sorted.
    #[must_use]
    pub fn states(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.is_aggregate_state())
            .map(|r| r.state.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct years, most recent first.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// Distinct cluster ids, ascending. Unclustered records are skipped.
    #[must_use]
    pub fn cluster_ids(&self) -> Vec<ClusterId> {
        self.records
            .iter()
            .filter_map(|r| r.cluster_label)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every record for `state` at or before `year`, in load order.
    #[must_use]
    pub fn for_state_until(&self, state: &str, year: i32) -> Vec<CrimeRecord> {
        self.records
            .iter()
            .filter(|r| r.state == state && r.year <= year)
            .cloned()
            .collect()
    }
}
