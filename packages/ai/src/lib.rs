#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Narrative insight generation over crime statistics.
//!
//! Supports Google Gemini (the default), Anthropic Claude, and `OpenAI` or
//! any `OpenAI`-compatible local/self-hosted server (Ollama, vLLM,
//! llama.cpp, LM Studio) via the `AI_BASE_URL` environment variable.
//!
//! [`insight::InsightClient`] turns a narrow slice of pre-aggregated data
//! into a prompt, makes exactly one provider call, and returns the raw
//! generated text. [`tracker::RequestTracker`] keeps the loading / result /
//! error state of each in-flight request keyed by what it is about.

pub mod insight;
pub mod prompts;
pub mod providers;
pub mod tracker;

use thiserror::Error;

pub use insight::{InsightClient, InsightError, InsightSubject};

/// Errors that can occur while talking to an LLM provider.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to LLM provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error.
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}
