//! Insight client: one prompt, one provider call, raw text back.

use crime_insights_analytics_models::ClusterProfile;
use crime_insights_crime_models::{ClusterId, CrimeRecord};
use thiserror::Error;

use crate::AiError;
use crate::prompts;
use crate::providers::{self, LlmProvider, ProviderConfig};

/// What an insight request is about. Also the key for per-request state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InsightSubject {
    /// A state's history up to and including a year.
    StateYear {
        /// State name.
        state: String,
        /// Focus year.
        year: i32,
    },
    /// A pre-assigned cluster.
    Cluster(ClusterId),
}

impl std::fmt::Display for InsightSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StateYear { state, year } => write!(f, "{state} ({year})"),
            Self::Cluster(id) => write!(f, "Cluster {id}"),
        }
    }
}

/// Errors surfaced to whoever triggered an insight request.
#[derive(Debug, Error)]
pub enum InsightError {
    /// No provider credential was configured.
    #[error("{message}")]
    Config {
        /// Remediation hint naming the variable to set.
        message: String,
    },

    /// The state has no total-crime-head rows at or before the year.
    #[error("No data available for {state} up to {year}.")]
    NoData {
        /// Requested state.
        state: String,
        /// Requested focus year.
        year: i32,
    },

    /// The provider call failed.
    #[error(
        "Failed to generate insights for {subject}. The service may be unavailable or the API key may be invalid."
    )]
    Generation {
        /// What the request was about.
        subject: InsightSubject,
        /// Underlying provider error.
        #[source]
        source: AiError,
    },
}

/// Single attempt; a failure is logged and wrapped with its subject.
async fn request(
    provider: &dyn LlmProvider,
    subject: InsightSubject,
    prompt: &str,
) -> Result<String, InsightError> {
    log::debug!("Requesting insights for {subject} ({} chars)", prompt.len());

    provider.generate(prompt).await.map_err(|source| {
        log::error!("Error generating insights for {subject}: {source}");
        InsightError::Generation { subject, source }
    })
}

enum Backend {
    Ready(Box<dyn LlmProvider>),
    Unconfigured { message: String },
}

/// Generates narrative insights through a single LLM provider.
///
/// A client built without credentials is still usable: every request
/// fails fast with [`InsightError::Config`] and nothing is sent.
pub struct InsightClient {
    backend: Backend,
}

impl InsightClient {
    /// Wraps an already-constructed provider.
    #[must_use]
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            backend: Backend::Ready(provider),
        }
    }

    /// A client whose every request fails with `message`.
    #[must_use]
    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unconfigured {
                message: message.into(),
            },
        }
    }

    /// Builds a client from `config`, falling back to an unconfigured
    /// client when no usable credential is present.
    #[must_use]
    pub fn from_config(config: &ProviderConfig) -> Self {
        match providers::create_provider(config) {
            Ok(provider) => {
                log::info!(
                    "Insight generation via {} ({})",
                    provider.name(),
                    provider.model()
                );
                Self::new(provider)
            }
            Err(AiError::Config { message }) => {
                log::warn!("{message} AI features will not work.");
                Self::unconfigured(message)
            }
            Err(e) => {
                log::warn!("Failed to create AI provider: {e}");
                Self::unconfigured(e.to_string())
            }
        }
    }

    /// Builds a client from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(&ProviderConfig::from_env())
    }

    /// Whether requests will reach a provider.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    fn provider(&self) -> Result<&dyn LlmProvider, InsightError> {
        match &self.backend {
            Backend::Ready(provider) => Ok(provider.as_ref()),
            Backend::Unconfigured { message } => Err(InsightError::Config {
                message: message.clone(),
            }),
        }
    }

    /// Research report for `state` as of `year`.
    ///
    /// `records` should hold the state's records with `year <= year`; only
    /// the total-crime-head rows are used.
    ///
    /// # Errors
    ///
    /// * [`InsightError::NoData`] if there are no total-crime-head rows.
    /// * [`InsightError::Config`] if no provider is configured.
    /// * [`InsightError::Generation`] if the provider call fails.
    pub async fn state_insight(
        &self,
        state: &str,
        year: i32,
        records: &[CrimeRecord],
    ) -> Result<String, InsightError> {
        let history = prompts::state_history(records);
        if history.is_empty() {
            return Err(InsightError::NoData {
                state: state.to_string(),
                year,
            });
        }

        let provider = self.provider()?;
        let prompt = prompts::state_prompt(state, year, &history);
        let subject = InsightSubject::StateYear {
            state: state.to_string(),
            year,
        };

        request(provider, subject, &prompt).await
    }

    /// Research brief for one cluster.
    ///
    /// # Errors
    ///
    /// * [`InsightError::Config`] if no provider is configured.
    /// * [`InsightError::Generation`] if the provider call fails.
    pub async fn cluster_insight(
        &self,
        cluster: ClusterId,
        profile: &ClusterProfile,
    ) -> Result<String, InsightError> {
        let provider = self.provider()?;
        let prompt = prompts::cluster_prompt(cluster, profile);

        request(provider, InsightSubject::Cluster(cluster), &prompt).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crime_insights_crime_models::TOTAL_CRIME_HEAD;

    use super::*;

    /// Provider that counts calls and either echoes or fails.
    pub struct StubProvider {
        pub calls: Arc<AtomicUsize>,
        pub fail: bool,
    }

    #[async_trait::async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        async fn generate(&self, prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AiError::Provider {
                    message: "quota exceeded".to_string(),
                });
            }
            Ok(format!("**Summary**\n{} chars", prompt.len()))
        }
    }

    pub fn stub_client(fail: bool) -> (InsightClient, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = InsightClient::new(Box::new(StubProvider {
            calls: calls.clone(),
            fail,
        }));
        (client, calls)
    }

    fn rec(year: i32, crime_head: &str) -> CrimeRecord {
        CrimeRecord {
            year,
            state: "Goa".to_string(),
            crime_head: crime_head.to_string(),
            number_of_incidences: 40,
            number_of_senior_citizen_victims: 41,
            crime_rate_per_lakh_population: 3.2,
            cluster_label: Some(1),
        }
    }

    fn profile() -> ClusterProfile {
        ClusterProfile {
            cluster: 1,
            avg_incidents: 15.0,
            avg_crime_rate: 2.0,
            top_states: vec!["Goa".to_string()],
            top_crime_types: vec!["Theft".to_string()],
        }
    }

    #[tokio::test]
    async fn state_insight_returns_generated_text() {
        let (client, calls) = stub_client(false);
        let text = client
            .state_insight("Goa", 2022, &[rec(2021, TOTAL_CRIME_HEAD)])
            .await
            .unwrap();
        assert!(text.starts_with("**Summary**"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_data_makes_no_call() {
        let (client, calls) = stub_client(false);

        let err = client.state_insight("Goa", 2022, &[]).await.unwrap_err();
        assert!(matches!(err, InsightError::NoData { ref state, year: 2022 } if state == "Goa"));

        // Category rows alone don't count as data.
        let err = client
            .state_insight("Goa", 2022, &[rec(2020, "Robbery")])
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::NoData { .. }));
        assert_eq!(err.to_string(), "No data available for Goa up to 2022.");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unconfigured_client_fails_both_requests() {
        let client = InsightClient::from_config(&ProviderConfig::default());
        assert!(!client.is_configured());

        let err = client
            .state_insight("Goa", 2022, &[rec(2021, TOTAL_CRIME_HEAD)])
            .await
            .unwrap_err();
        assert!(matches!(err, InsightError::Config { .. }));
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let err = client.cluster_insight(1, &profile()).await.unwrap_err();
        assert!(matches!(err, InsightError::Config { .. }));
    }

    #[tokio::test]
    async fn provider_failure_names_subject() {
        let (client, calls) = stub_client(true);

        let err = client.cluster_insight(4, &profile()).await.unwrap_err();
        assert!(matches!(
            err,
            InsightError::Generation {
                subject: InsightSubject::Cluster(4),
                ..
            }
        ));
        assert!(err.to_string().contains("Cluster 4"));

        let err = client
            .state_insight("Goa", 2021, &[rec(2021, TOTAL_CRIME_HEAD)])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Goa (2021)"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
