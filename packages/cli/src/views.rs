//! Table and JSON output for every derived view.

use crime_insights_analytics::Dashboard;
use crime_insights_crime_models::Metric;
use crime_insights_report::table::{heat_cell, render_table};
use serde::Serialize;

/// A derived view the CLI can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Yearly,
    TopStates { year: i32, metric: Metric },
    Categories,
    Clusters,
    ClusterProfiles,
    Scatter,
    Distribution,
    Trends,
    Proportions,
    Heatmap,
}

impl View {
    /// Every view that takes no parameters, in menu order.
    pub const PLAIN: &'static [Self] = &[
        Self::Yearly,
        Self::Categories,
        Self::Clusters,
        Self::ClusterProfiles,
        Self::Scatter,
        Self::Distribution,
        Self::Trends,
        Self::Proportions,
        Self::Heatmap,
    ];

    #[must_use]
    pub fn title(self) -> String {
        match self {
            Self::Yearly => "Total incidents per year".to_string(),
            Self::TopStates { year, metric } => {
                format!("Top states by {} ({year})", metric.label())
            }
            Self::Categories => "Top crime categories (all years)".to_string(),
            Self::Clusters => "Cluster summary".to_string(),
            Self::ClusterProfiles => "Cluster profiles".to_string(),
            Self::Scatter => "Incidents vs. crime rate by cluster".to_string(),
            Self::Distribution => "States in higher-risk clusters".to_string(),
            Self::Trends => "Top 5 category trends".to_string(),
            Self::Proportions => "Category proportions per year".to_string(),
            Self::Heatmap => "Crime rate heatmap (state x year)".to_string(),
        }
    }
}

fn output<T: Serialize + ?Sized>(
    title: &str,
    value: &T,
    as_json: bool,
    table: impl FnOnce(&T) -> String,
) -> Result<String, serde_json::Error> {
    if as_json {
        serde_json::to_string_pretty(value)
    } else {
        Ok(format!("{title}\n\n{}", table(value)))
    }
}

fn cell_or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Renders `view` as a table, or as pretty JSON when `as_json` is set.
///
/// # Errors
///
/// Only JSON serialization can fail.
pub fn render(dashboard: &Dashboard, view: View, as_json: bool) -> Result<String, serde_json::Error> {
    let title = view.title();

    match view {
        View::Yearly => output(&title, &*dashboard.yearly_totals(), as_json, |totals| {
            let rows: Vec<_> = totals
                .iter()
                .map(|t| vec![t.year.to_string(), t.total.to_string()])
                .collect();
            render_table(&["Year", "Total Incidents"], &rows)
        }),
        View::TopStates { year, metric } => {
            output(&title, &*dashboard.top_states(year, metric), as_json, |entries| {
                let rows: Vec<_> = entries
                    .iter()
                    .map(|e| {
                        let value = match metric {
                            Metric::Incidents => format!("{:.0}", e.value),
                            Metric::CrimeRate => format!("{:.1}", e.value),
                        };
                        vec![e.name.clone(), value]
                    })
                    .collect();
                render_table(&["State", metric.label()], &rows)
            })
        }
        View::Categories => output(&title, &*dashboard.category_ranking(), as_json, |cats| {
            let rows: Vec<_> = cats
                .iter()
                .map(|c| vec![c.name.clone(), c.total.to_string()])
                .collect();
            render_table(&["Crime Head", "Incidents"], &rows)
        }),
        View::Clusters => output(&title, &*dashboard.cluster_summary(), as_json, |summary| {
            let rows: Vec<_> = summary
                .iter()
                .map(|s| {
                    vec![
                        s.name.clone(),
                        s.count.to_string(),
                        format!("{:.2}", s.avg_incidents),
                        format!("{:.2}", s.avg_crime_rate),
                    ]
                })
                .collect();
            render_table(
                &["Cluster", "Records", "Avg Incidents", "Avg Crime Rate"],
                &rows,
            )
        }),
        View::ClusterProfiles => {
            let profiles = dashboard.cluster_profiles();
            let list: Vec<_> = profiles.values().collect();
            output(&title, &list, as_json, |list| {
                let rows: Vec<_> = list
                    .iter()
                    .map(|p| {
                        vec![
                            format!("Cluster {}", p.cluster),
                            format!("{:.2}", p.avg_incidents),
                            format!("{:.2}", p.avg_crime_rate),
                            p.top_states.join(", "),
                            p.top_crime_types.join(", "),
                        ]
                    })
                    .collect();
                render_table(
                    &[
                        "Cluster",
                        "Avg Incidents",
                        "Avg Crime Rate",
                        "Top States",
                        "Top Crime Types",
                    ],
                    &rows,
                )
            })
        }
        View::Scatter => output(&title, &*dashboard.cluster_scatter(), as_json, |groups| {
            let rows: Vec<_> = groups
                .iter()
                .flat_map(|g| {
                    g.points.iter().map(move |p| {
                        vec![
                            format!("Cluster {}", g.cluster),
                            p.state.clone(),
                            p.year.to_string(),
                            p.incidents.to_string(),
                            format!("{:.1}", p.crime_rate),
                        ]
                    })
                })
                .collect();
            render_table(
                &["Cluster", "State", "Year", "Incidents", "Crime Rate"],
                &rows,
            )
        }),
        View::Distribution => output(&title, &*dashboard.state_distribution(), as_json, |shares| {
            let rows: Vec<_> = shares
                .iter()
                .map(|s| vec![s.state.clone(), s.count.to_string()])
                .collect();
            render_table(&["State", "Records"], &rows)
        }),
        View::Trends => output(&title, &*dashboard.trend_series(), as_json, |series| {
            let mut headers = vec!["Year"];
            headers.extend(series.categories.iter().map(String::as_str));
            let rows: Vec<_> = series
                .rows
                .iter()
                .map(|r| {
                    let mut row = vec![r.year.to_string()];
                    row.extend(
                        series
                            .categories
                            .iter()
                            .map(|c| cell_or_dash(r.values.get(c))),
                    );
                    row
                })
                .collect();
            render_table(&headers, &rows)
        }),
        View::Proportions => output(&title, &*dashboard.proportion_series(), as_json, |series| {
            let mut headers = vec!["Year"];
            headers.extend(series.categories.iter().map(String::as_str));
            let rows: Vec<_> = series
                .rows
                .iter()
                .map(|r| {
                    let mut row = vec![r.year.to_string()];
                    row.extend(series.categories.iter().map(|c| {
                        cell_or_dash(r.percentages.get(c).map(|p| format!("{p:.1}%")))
                    }));
                    row
                })
                .collect();
            render_table(&headers, &rows)
        }),
        View::Heatmap => output(&title, &*dashboard.rate_matrix(), as_json, |matrix| {
            let years: Vec<String> = matrix.years.iter().map(ToString::to_string).collect();
            let mut headers = vec!["State"];
            headers.extend(years.iter().map(String::as_str));
            let rows: Vec<_> = matrix
                .rows
                .iter()
                .map(|s| {
                    let mut row = vec![s.state.clone()];
                    row.extend(matrix.years.iter().map(|&y| heat_cell(s.rate(y))));
                    row
                })
                .collect();
            render_table(&headers, &rows)
        }),
    }
}
