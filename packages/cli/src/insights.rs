//! Insight requests with one spinner per request and output scoped to
//! each request.

use crime_insights_ai::tracker::{RequestState, RequestTracker};
use crime_insights_ai::{InsightClient, InsightSubject};
use crime_insights_analytics::Dashboard;
use crime_insights_cli_utils::{MultiProgress, pending_spinner};
use crime_insights_crime_models::ClusterId;
use crime_insights_report::markdown::{parse_insight_text, render_error, render_insight};
use futures::future::join_all;

/// Year used when a command doesn't name one and the store has no years.
pub const DEFAULT_YEAR: i32 = 2022;

/// Runs insight requests against one client and remembers their outcome.
pub struct InsightSession<'a> {
    dashboard: &'a Dashboard,
    client: &'a InsightClient,
    multi: &'a MultiProgress,
    tracker: RequestTracker,
    json: bool,
}

impl<'a> InsightSession<'a> {
    #[must_use]
    pub fn new(
        dashboard: &'a Dashboard,
        client: &'a InsightClient,
        multi: &'a MultiProgress,
        json: bool,
    ) -> Self {
        Self {
            dashboard,
            client,
            multi,
            tracker: RequestTracker::new(),
            json,
        }
    }

    /// Latest year in the store, or [`DEFAULT_YEAR`].
    #[must_use]
    pub fn latest_year(&self) -> i32 {
        self.dashboard
            .store()
            .years()
            .first()
            .copied()
            .unwrap_or(DEFAULT_YEAR)
    }

    /// Research report for `state` up to `year` (latest year if `None`).
    pub async fn state(&mut self, state: &str, year: Option<i32>) {
        let year = year.unwrap_or_else(|| self.latest_year());
        let subject = InsightSubject::StateYear {
            state: state.to_string(),
            year,
        };
        if let Err(e) = self.tracker.begin(subject.clone()) {
            log::warn!("{e}");
            return;
        }

        let records = self.dashboard.store().for_state_until(state, year);
        log::debug!("{} records for {subject}", records.len());

        let spinner = pending_spinner(self.multi, &format!("Generating insights for {subject}"));
        let result = self.client.state_insight(state, year, &records).await;
        spinner.finish_and_clear();

        self.tracker.complete(subject.clone(), result);
        self.print(&subject);
    }

    /// Research brief for one cluster.
    pub async fn cluster(&mut self, cluster: ClusterId) {
        let subject = InsightSubject::Cluster(cluster);
        let Some(profile) = self.dashboard.cluster_profile(cluster) else {
            self.print_failure(&subject, &format!("No records carry cluster label {cluster}."));
            return;
        };
        if let Err(e) = self.tracker.begin(subject.clone()) {
            log::warn!("{e}");
            return;
        }

        let spinner = pending_spinner(self.multi, &format!("Generating insights for {subject}"));
        let result = self.client.cluster_insight(cluster, &profile).await;
        spinner.finish_and_clear();

        self.tracker.complete(subject.clone(), result);
        self.print(&subject);
    }

    /// Research briefs for every cluster, requested concurrently.
    ///
    /// A failure for one cluster is reported in that cluster's block and
    /// doesn't affect the others.
    pub async fn all_clusters(&mut self) {
        let profiles = self.dashboard.cluster_profiles();

        let mut jobs = Vec::new();
        for (&cluster, profile) in profiles.iter() {
            let subject = InsightSubject::Cluster(cluster);
            match self.tracker.begin(subject.clone()) {
                Ok(()) => jobs.push((subject, cluster, profile)),
                Err(e) => log::warn!("{e}"),
            }
        }

        if jobs.is_empty() {
            log::info!("No clusters to analyse");
            return;
        }
        log::info!("Requesting insights for {} clusters", jobs.len());

        let client = self.client;
        let multi = self.multi;
        let results = join_all(jobs.iter().map(|(subject, cluster, profile)| async move {
            let spinner = pending_spinner(multi, &format!("Generating insights for {subject}"));
            let result = client.cluster_insight(*cluster, profile).await;
            spinner.finish_and_clear();
            result
        }))
        .await;

        for ((subject, ..), result) in jobs.into_iter().zip(results) {
            self.tracker.complete(subject.clone(), result);
            self.print(&subject);
        }
    }

    fn print(&self, subject: &InsightSubject) {
        match self.tracker.state(subject) {
            RequestState::Succeeded(text) => self.print_success(subject, text),
            RequestState::Failed(message) => self.print_failure(subject, message),
            RequestState::Idle | RequestState::Pending => {
                log::warn!("No result recorded for {subject}");
            }
        }
    }

    fn print_success(&self, subject: &InsightSubject, text: &str) {
        if self.json {
            let value = serde_json::json!({
                "subject": subject.to_string(),
                "nodes": parse_insight_text(text),
            });
            println!("{value:#}");
        } else {
            println!("=== {subject} ===");
            println!("{}", render_insight(text));
        }
    }

    fn print_failure(&self, subject: &InsightSubject, message: &str) {
        if self.json {
            let value = serde_json::json!({
                "subject": subject.to_string(),
                "error": message,
            });
            println!("{value:#}");
        } else {
            eprintln!("{}", render_error(&subject.to_string(), message));
        }
    }
}
