#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation layer for the crime-insights dashboards.
//!
//! [`views`] holds one pure function per derived view. They never fail:
//! empty input gives empty output, and a group with no rows is left out
//! rather than averaged over zero. [`dashboard::Dashboard`] wraps a
//! [`crime_insights_store::RecordStore`] and memoizes each view per
//! distinct set of parameters.

pub mod dashboard;
pub mod views;

pub use dashboard::Dashboard;
