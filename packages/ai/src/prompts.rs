//! Prompt construction for the two insight requests.

use crime_insights_analytics_models::ClusterProfile;
use crime_insights_crime_models::{ClusterId, CrimeRecord};
use serde::Serialize;

/// One year of a state's history as embedded in the prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Calendar year.
    pub year: i32,
    /// Total incidents.
    pub incidents: u64,
    /// Crime rate per lakh population.
    pub crime_rate: f64,
}

/// Reduces a state's records to its total-crime-head history, oldest first.
#[must_use]
pub fn state_history(records: &[CrimeRecord]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .filter(|r| r.is_total())
        .map(|r| TrendPoint {
            year: r.year,
            incidents: r.number_of_incidences,
            crime_rate: r.crime_rate_per_lakh_population,
        })
        .collect();

    points.sort_by_key(|p| p.year);
    points
}

/// Builds the research-report prompt for one state up to `year`.
#[must_use]
pub fn state_prompt(state: &str, year: i32, history: &[TrendPoint]) -> String {
    let data = serde_json::to_string_pretty(history).unwrap_or_else(|_| "[]".to_string());
    let next_year = year + 1;

    format!(
        r#"You are a data analyst and researcher specialising in criminology in India. Analyse the historical data on crimes against senior citizens below and provide actionable insights.

**Analysis Request**
- **Topic**: Crimes against Senior Citizens
- **Region**: {state}, India
- **Focus Year**: {year}
- **Historical Data Provided**: Total incidents and crime rate per lakh population for {state} up to the focus year.

**Data Summary:**
```json
{data}
```

**Your Task:**
Write a concise research report in Markdown with exactly these sections:

1.  **Executive Summary**: A brief overview of the situation for senior citizens in {state} as of {year}.
2.  **Key Trend Analysis**: Describe the trend in total incidents and crime rate leading up to {year}. Is it increasing, decreasing, or stable? Call out significant fluctuations.
3.  **Potential Contributing Factors**: Suggest 2-3 plausible but hypothetical socio-economic factors that could be driving these trends in {state}. Begin this section with "Hypothetical factors could include:".
4.  **Data-Driven Prediction for {next_year}**: Based only on the numbers, give a simple, plausible prediction of total incidents for {next_year} and explain the reasoning (e.g. linear trend, recent acceleration).

Keep the analysis objective and data-centric. Do not invent data that is not in the summary."#
    )
}

/// Builds the research-brief prompt for one cluster.
#[must_use]
pub fn cluster_prompt(cluster: ClusterId, profile: &ClusterProfile) -> String {
    let avg_incidents = profile.avg_incidents;
    let avg_rate = profile.avg_crime_rate;
    let states = profile.top_states.join(", ");
    let crime_types = profile.top_crime_types.join(", ");

    format!(
        r#"You are a senior criminologist and socio-economic analyst interpreting machine learning cluster data. Uncover the story behind this cluster and propose research directions.

**Analysis Request: Profile of Crime Cluster {cluster}**

**Data Profile:**
- **Cluster ID**: {cluster}
- **Average Incidents**: {avg_incidents:.2}
- **Average Crime Rate (per 1 Lakh Pop.)**: {avg_rate:.2}
- **Dominant States in this Cluster**: {states}
- **Most Prevalent Crime Types in this Cluster**: {crime_types}

**Your Task:**
Produce a short research brief in Markdown with exactly these sections:

1.  **Cluster Archetype**: A descriptive title for the cluster, such as "High-Risk Urban Hotspots" or "Low-Incidence Rural Regions".
2.  **Profile Summary**: The key characteristics of the cluster. Is it defined by high volume, high rate, or a specific type of crime?
3.  **Hidden Research Findings & Hypothesis**: A hypothesis for why these states and crime types group together, considering urbanisation, policing effectiveness, economic conditions, or social structures.
4.  **Proposed Research Questions**: 2-3 specific, actionable questions a sociologist or criminologist could investigate to validate or refute the hypothesis.

Connect the quantitative profile to real-world phenomena and give a clear path for further research."#
    )
}

#[cfg(test)]
mod tests {
    use crime_insights_crime_models::TOTAL_CRIME_HEAD;

    use super::*;

    fn rec(year: i32, crime_head: &str, incidents: u64, rate: f64) -> CrimeRecord {
        CrimeRecord {
            year,
            state: "Kerala".to_string(),
            crime_head: crime_head.to_string(),
            number_of_incidences: incidents,
            number_of_senior_citizen_victims: incidents,
            crime_rate_per_lakh_population: rate,
            cluster_label: Some(2),
        }
    }

    #[test]
    fn history_is_total_rows_oldest_first() {
        let records = vec![
            rec(2021, TOTAL_CRIME_HEAD, 900, 9.0),
            rec(2020, "Robbery", 50, 0.5),
            rec(2019, TOTAL_CRIME_HEAD, 700, 7.0),
        ];
        let history = state_history(&records);
        assert_eq!(
            history,
            vec![
                TrendPoint { year: 2019, incidents: 700, crime_rate: 7.0 },
                TrendPoint { year: 2021, incidents: 900, crime_rate: 9.0 },
            ]
        );
    }

    #[test]
    fn state_prompt_embeds_history_and_sections() {
        let history = vec![TrendPoint { year: 2020, incidents: 800, crime_rate: 80.0 }];
        let prompt = state_prompt("Kerala", 2020, &history);
        assert!(prompt.contains("**Region**: Kerala, India"));
        assert!(prompt.contains("\"incidents\": 800"));
        assert!(prompt.contains("\"crime_rate\": 80.0"));
        assert!(prompt.contains("**Executive Summary**"));
        assert!(prompt.contains("**Key Trend Analysis**"));
        assert!(prompt.contains("**Potential Contributing Factors**"));
        assert!(prompt.contains("**Data-Driven Prediction for 2021**"));
    }

    #[test]
    fn cluster_prompt_formats_profile() {
        let profile = ClusterProfile {
            cluster: 3,
            avg_incidents: 1_466.666_666,
            avg_crime_rate: 20.6,
            top_states: vec!["Haryana".to_string(), "Gujarat".to_string()],
            top_crime_types: vec!["Theft (Sec.379 IPC)".to_string()],
        };
        let prompt = cluster_prompt(3, &profile);
        assert!(prompt.contains("Profile of Crime Cluster 3"));
        assert!(prompt.contains("**Average Incidents**: 1466.67"));
        assert!(prompt.contains("**Average Crime Rate (per 1 Lakh Pop.)**: 20.60"));
        assert!(prompt.contains("**Dominant States in this Cluster**: Haryana, Gujarat"));
        assert!(prompt.contains("**Cluster Archetype**"));
        assert!(prompt.contains("**Proposed Research Questions**"));
    }
}
