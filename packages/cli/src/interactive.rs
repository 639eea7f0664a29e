//! Interactive menu for browsing views and requesting insights.
//!
//! Loops until the user picks "Quit". Insight results from earlier
//! requests stay in the session, so a pending subject can't be
//! submitted twice.

use crime_insights_ai::InsightClient;
use crime_insights_analytics::Dashboard;
use crime_insights_cli_utils::MultiProgress;
use crime_insights_crime_models::Metric;
use dialoguer::Select;

use crate::insights::InsightSession;
use crate::views::{self, View};

/// Top-level actions in the interactive menu.
#[derive(Clone, Copy)]
enum Action {
    Show(View),
    TopStates,
    StateInsight,
    ClusterInsight,
    AllClusterInsights,
    Quit,
}

impl Action {
    fn all() -> Vec<Self> {
        let mut actions: Vec<Self> = View::PLAIN.iter().copied().map(Self::Show).collect();
        actions.insert(1, Self::TopStates);
        actions.extend([
            Self::StateInsight,
            Self::ClusterInsight,
            Self::AllClusterInsights,
            Self::Quit,
        ]);
        actions
    }

    fn label(self) -> String {
        match self {
            Self::Show(view) => view.title(),
            Self::TopStates => "Top states for a year".to_string(),
            Self::StateInsight => "AI insight: state report".to_string(),
            Self::ClusterInsight => "AI insight: cluster brief".to_string(),
            Self::AllClusterInsights => "AI insight: every cluster".to_string(),
            Self::Quit => "Quit".to_string(),
        }
    }
}

/// Runs the interactive menu.
///
/// # Errors
///
/// Returns an error if a prompt fails or a view can't be serialized.
pub async fn run(
    dashboard: &Dashboard,
    multi: &MultiProgress,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Senior Citizen Crime Insights");
    println!();

    let client = InsightClient::from_env();
    let mut session = InsightSession::new(dashboard, &client, multi, json);

    let actions = Action::all();
    let labels: Vec<String> = actions.iter().map(|a| a.label()).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to see?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[idx] {
            Action::Show(view) => println!("{}", views::render(dashboard, view, json)?),
            Action::TopStates => {
                let view = pick_top_states(dashboard)?;
                println!("{}", views::render(dashboard, view, json)?);
            }
            Action::StateInsight => {
                let states = dashboard.store().states();
                let years = dashboard.store().years();
                if states.is_empty() || years.is_empty() {
                    println!("No data loaded.");
                    continue;
                }
                let state = pick("State", &states)?;
                let year = pick("Year", &years)?;
                session.state(&states[state], Some(years[year])).await;
            }
            Action::ClusterInsight => {
                let clusters = dashboard.store().cluster_ids();
                if clusters.is_empty() {
                    println!("No clusters in the data.");
                    continue;
                }
                let labels: Vec<String> =
                    clusters.iter().map(|c| format!("Cluster {c}")).collect();
                let idx = pick("Cluster", &labels)?;
                session.cluster(clusters[idx]).await;
            }
            Action::AllClusterInsights => session.all_clusters().await,
            Action::Quit => break,
        }
        println!();
    }

    Ok(())
}

fn pick<T: std::fmt::Display>(prompt: &str, items: &[T]) -> Result<usize, dialoguer::Error> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
}

fn pick_top_states(dashboard: &Dashboard) -> Result<View, dialoguer::Error> {
    let years = dashboard.store().years();
    let year = if years.is_empty() {
        crate::insights::DEFAULT_YEAR
    } else {
        years[pick("Year", &years)?]
    };

    let metrics = Metric::all();
    let labels: Vec<&str> = metrics.iter().map(|m| m.label()).collect();
    let metric = metrics[pick("Rank by", &labels)?];

    Ok(View::TopStates { year, metric })
}
