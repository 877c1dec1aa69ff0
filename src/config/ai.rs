//! AI provider configuration
//!
//! One OpenAI-compatible chat-completions endpoint serves form generation,
//! adaptive follow-ups, insights and the data assistant.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Bearer key for the completions endpoint
    pub api_key: Secret<String>,

    /// Base URL, without the `/chat/completions` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature used when a call does not set one
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion cap used when a call does not set one
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on rate limits and transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Provider name for logs, derived from the endpoint host
    pub fn provider_name(&self) -> &'static str {
        if self.base_url.contains("groq.com") {
            "groq"
        } else if self.base_url.contains("openai.com") {
            "openai"
        } else {
            "openai-compatible"
        }
    }

    /// Validate AI configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::AiBaseUrlMustBeHttps);
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: Secret::new(String::new()),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed() -> AiConfig {
        AiConfig {
            api_key: Secret::new("gsk_test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.max_tokens, 1500);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.provider_name(), "groq");
    }

    #[test]
    fn test_validation_requires_key() {
        assert_eq!(
            AiConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );
        assert!(keyed().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_validation_base_url_scheme() {
        let config = AiConfig {
            base_url: "ftp://models.local".to_string(),
            ..keyed()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidAiBaseUrl)
        );

        let plain_http = AiConfig {
            base_url: "http://localhost:11434/v1".to_string(),
            ..keyed()
        };
        assert!(plain_http.validate(&Environment::Development).is_ok());
        assert_eq!(
            plain_http.validate(&Environment::Production),
            Err(ValidationError::AiBaseUrlMustBeHttps)
        );
        assert_eq!(plain_http.provider_name(), "openai-compatible");
    }

    #[test]
    fn test_validation_sampling_bounds() {
        let hot = AiConfig {
            temperature: 2.5,
            ..keyed()
        };
        assert_eq!(
            hot.validate(&Environment::Development),
            Err(ValidationError::InvalidTemperature)
        );

        let empty = AiConfig {
            max_tokens: 0,
            ..keyed()
        };
        assert_eq!(
            empty.validate(&Environment::Development),
            Err(ValidationError::InvalidMaxTokens)
        );
    }
}
