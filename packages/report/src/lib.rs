#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal presentation for crime-insights.
//!
//! [`markdown`] turns generated narrative text into typed content nodes and
//! renders them; [`table`] lays out the derived views as plain-text tables.

pub mod markdown;
pub mod table;
