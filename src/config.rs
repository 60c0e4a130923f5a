//! Environment-driven configuration for the chat service.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::{Error, Result};

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind the HTTP server to.
    pub host: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Path to the cruise catalog seed file (JSON array of cruises).
    pub catalog_path: PathBuf,
    /// Completion provider settings.
    pub provider: ProviderConfig,
}

/// Completion provider settings: endpoint, credentials and sampling.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible completions API.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Primary API credential.
    pub primary_api_key: String,
    /// Optional secondary credential. When absent, failover is disabled.
    pub secondary_api_key: Option<String>,
    /// Whole-request timeout for provider calls.
    pub timeout: Duration,
    pub sampling: SamplingParams,
}

/// Product-tuned sampling constants, overridable per deployment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f64,
    /// Output bound for the tool-eligible call only; the streaming
    /// follow-up runs unbounded so narrative answers are not cut short.
    pub max_tokens: u32,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            frequency_penalty: 0.5,
            presence_penalty: 0.5,
        }
    }
}

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl AppConfig {
    /// Reads the configuration from environment variables.
    ///
    /// `AI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let primary_api_key = env::var("AI_API_KEY")
            .map_err(|_| Error::Configuration("AI_API_KEY not set".to_string()))?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            catalog_path: env::var("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/cruises.json")),
            provider: ProviderConfig {
                base_url: env::var("AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                primary_api_key,
                secondary_api_key: env::var("AI_API_KEY_SECONDARY")
                    .ok()
                    .filter(|k| !k.trim().is_empty()),
                timeout: Duration::from_secs(
                    env::var("AI_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(DEFAULT_TIMEOUT_SECS),
                ),
                sampling: SamplingParams {
                    temperature: env_f64("AI_TEMPERATURE", SamplingParams::default().temperature),
                    max_tokens: env::var("AI_MAX_TOKENS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(SamplingParams::default().max_tokens),
                    frequency_penalty: env_f64(
                        "AI_FREQUENCY_PENALTY",
                        SamplingParams::default().frequency_penalty,
                    ),
                    presence_penalty: env_f64(
                        "AI_PRESENCE_PENALTY",
                        SamplingParams::default().presence_penalty,
                    ),
                },
            },
        })
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_defaults_are_product_constants() {
        let s = SamplingParams::default();
        assert_eq!(s.temperature, 0.7);
        assert_eq!(s.max_tokens, 1024);
        assert_eq!(s.frequency_penalty, 0.5);
        assert_eq!(s.presence_penalty, 0.5);
    }
}
