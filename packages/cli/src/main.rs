#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal front end for senior-citizen crime statistics.
//!
//! ```text
//! crime_insights yearly
//! crime_insights top-states --year 2021 --metric crime-rate
//! crime_insights heatmap --json
//! crime_insights insight state Kerala --year 2020
//! crime_insights insight clusters
//! ```
//!
//! Running with no subcommand enters interactive mode.
//!
//! Uses `indicatif-log-bridge` (via [`crime_insights_cli_utils::init_logger`])
//! so log lines and request spinners never fight for the terminal.

mod insights;
mod interactive;
mod views;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crime_insights_ai::InsightClient;
use crime_insights_analytics::Dashboard;
use crime_insights_crime_models::{ClusterId, Metric};
use crime_insights_store::RecordStore;

use crate::insights::{DEFAULT_YEAR, InsightSession};
use crate::views::View;

#[derive(Parser)]
#[command(
    name = "crime_insights",
    about = "Explore crimes against senior citizens and generate AI research insights"
)]
struct Cli {
    /// CSV file to load instead of the embedded sample data
    #[arg(long, global = true, env = "CRIME_INSIGHTS_DATA")]
    data: Option<PathBuf>,

    /// Print views and insights as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Total incidents per year, all states combined
    Yearly,
    /// Top 10 states for a year
    TopStates {
        /// Year to rank
        #[arg(long, default_value_t = DEFAULT_YEAR)]
        year: i32,
        /// Field to rank by (incidents or crime-rate)
        #[arg(long, default_value_t = Metric::Incidents)]
        metric: Metric,
    },
    /// Top 10 crime categories across all years
    Categories,
    /// Average incidents and crime rate per cluster
    Clusters,
    /// Top states and crime types per cluster
    ClusterProfiles,
    /// Incidents vs. crime rate points grouped by cluster
    Scatter,
    /// States most often found in higher-risk clusters
    Distribution,
    /// Yearly incidents for the five largest categories
    Trends,
    /// Yearly share of the five largest categories and everything else
    Proportions,
    /// Crime rate per state and year
    Heatmap,
    /// Generate a narrative research insight
    Insight {
        #[command(subcommand)]
        target: InsightTarget,
    },
}

#[derive(Subcommand)]
enum InsightTarget {
    /// Research report for one state up to a year
    State {
        /// State name as it appears in the data
        state: String,
        /// Focus year (defaults to the latest year in the data)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Research brief for one cluster
    Cluster {
        /// Cluster id
        id: ClusterId,
    },
    /// Research briefs for every cluster, requested concurrently
    Clusters,
}

impl Commands {
    const fn view(&self) -> Option<View> {
        Some(match *self {
            Self::Yearly => View::Yearly,
            Self::TopStates { year, metric } => View::TopStates { year, metric },
            Self::Categories => View::Categories,
            Self::Clusters => View::Clusters,
            Self::ClusterProfiles => View::ClusterProfiles,
            Self::Scatter => View::Scatter,
            Self::Distribution => View::Distribution,
            Self::Trends => View::Trends,
            Self::Proportions => View::Proportions,
            Self::Heatmap => View::Heatmap,
            Self::Insight { .. } => return None,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crime_insights_cli_utils::init_logger();
    let cli = Cli::parse();

    let store = match &cli.data {
        Some(path) => RecordStore::from_path(path)?,
        None => RecordStore::embedded()?,
    };
    log::info!("Loaded {} records", store.len());
    let dashboard = Dashboard::new(Arc::new(store));

    let Some(command) = cli.command else {
        return interactive::run(&dashboard, &multi, cli.json).await;
    };

    if let Some(view) = command.view() {
        println!("{}", views::render(&dashboard, view, cli.json)?);
        return Ok(());
    }

    let Commands::Insight { target } = command else {
        return Ok(());
    };

    let client = InsightClient::from_env();
    let mut session = InsightSession::new(&dashboard, &client, &multi, cli.json);

    match target {
        InsightTarget::State { state, year } => session.state(&state, year).await,
        InsightTarget::Cluster { id } => session.cluster(id).await,
        InsightTarget::Clusters => session.all_clusters().await,
    }

    Ok(())
}
