//! LLM provider abstraction and implementations.
//!
//! Supports Gemini, Anthropic Claude, and `OpenAI` via a common trait.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use crate::AiError;

/// Trait for LLM providers.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider name, for logs.
    fn name(&self) -> &'static str;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Sends a single prompt and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the request fails or the response carries no
    /// text.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Provider settings, usually captured from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Explicit provider choice (`AI_PROVIDER`).
    pub provider: Option<String>,
    /// Model override (`AI_MODEL`).
    pub model: Option<String>,
    /// Base URL for `OpenAI`-compatible servers (`AI_BASE_URL`).
    pub base_url: Option<String>,
    /// `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub gemini_api_key: Option<String>,
    /// `ANTHROPIC_API_KEY`.
    pub anthropic_api_key: Option<String>,
    /// `OPENAI_API_KEY`.
    pub openai_api_key: Option<String>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ProviderConfig {
    /// Reads every provider setting from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            provider: env_var("AI_PROVIDER"),
            model: env_var("AI_MODEL"),
            base_url: env_var("AI_BASE_URL"),
            gemini_api_key: env_var("GEMINI_API_KEY").or_else(|| env_var("API_KEY")),
            anthropic_api_key: env_var("ANTHROPIC_API_KEY"),
            openai_api_key: env_var("OPENAI_API_KEY"),
        }
    }

    /// Auto-detects which provider to use based on available credentials.
    ///
    /// Checks in priority order: explicit `AI_PROVIDER`, Gemini, Anthropic,
    /// `OpenAI` (a key or a custom base URL).
    fn detect_provider(&self) -> Option<String> {
        if let Some(provider) = &self.provider {
            return Some(provider.to_lowercase());
        }

        if self.gemini_api_key.is_some() {
            log::info!("Auto-detected AI provider: Gemini (GEMINI_API_KEY/API_KEY found)");
            return Some("gemini".to_string());
        }

        if self.anthropic_api_key.is_some() {
            log::info!("Auto-detected AI provider: Anthropic (ANTHROPIC_API_KEY found)");
            return Some("anthropic".to_string());
        }

        if self.openai_api_key.is_some() || self.base_url.is_some() {
            log::info!("Auto-detected AI provider: OpenAI (OPENAI_API_KEY or AI_BASE_URL found)");
            return Some("openai".to_string());
        }

        None
    }
}

/// Creates an LLM provider from `config`.
///
/// # Errors
///
/// Returns [`AiError::Config`] if no credentials are found, the explicitly
/// requested provider has no key, or the provider name is unknown.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn LlmProvider>, AiError> {
    let Some(provider) = config.detect_provider() else {
        return Err(AiError::Config {
            message: "No AI credentials configured. Set the GEMINI_API_KEY (or API_KEY) \
                      environment variable, or ANTHROPIC_API_KEY / OPENAI_API_KEY."
                .to_string(),
        });
    };

    match provider.as_str() {
        "gemini" | "google" => {
            let api_key = config.gemini_api_key.clone().ok_or_else(|| AiError::Config {
                message: "Gemini API key is not configured. Please set the GEMINI_API_KEY \
                          (or API_KEY) environment variable."
                    .to_string(),
            })?;
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());
            Ok(Box::new(gemini::GeminiProvider::new(api_key, model)))
        }
        "anthropic" | "claude" => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .ok_or_else(|| AiError::Config {
                    message: "ANTHROPIC_API_KEY environment variable not set".to_string(),
                })?;
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| anthropic::DEFAULT_MODEL.to_string());
            Ok(Box::new(anthropic::AnthropicProvider::new(api_key, model)))
        }
        "openai" | "gpt" => {
            // Local OpenAI-compatible servers usually don't check the key.
            let api_key = match (&config.openai_api_key, &config.base_url) {
                (Some(key), _) => key.clone(),
                (None, Some(_)) => String::new(),
                (None, None) => {
                    return Err(AiError::Config {
                        message: "OPENAI_API_KEY environment variable not set".to_string(),
                    });
                }
            };
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string());
            let base_url = config
                .base_url
                .clone()
                .unwrap_or_else(|| openai::DEFAULT_BASE_URL.to_string());
            Ok(Box::new(openai::OpenAiProvider::new(api_key, model, base_url)))
        }
        other => Err(AiError::Config {
            message: format!(
                "Unknown AI provider: {other}. Use 'gemini', 'anthropic', or 'openai'."
            ),
        }),
    }
}

/// Creates an LLM provider based on environment variables.
///
/// # Errors
///
/// See [`create_provider`].
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, AiError> {
    create_provider(&ProviderConfig::from_env())
}
