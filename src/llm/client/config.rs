//! LLM client configuration.
//!
//! Values come from the config file's `[llm]` section, with environment
//! variables layered on top in `Default`.

use serde::{Deserialize, Serialize};

/// LLM provider type. Both speak the OpenAI chat-completions protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI-compatible API (OpenAI, Groq, Together.ai, etc.)
    #[default]
    OpenAI,
    /// Ollama's OpenAI-compatible endpoint (local)
    Ollama,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "groq" | "together" => Some(Self::OpenAI),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com",
            Self::Ollama => "http://localhost:11434",
        }
    }
}

/// Configuration for the LLM client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether LLM calls are enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// LLM provider (openai or ollama)
    #[serde(default)]
    pub provider: LlmProvider,
    /// API base URL, without the `/v1` suffix
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer token; never written back to config files
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model used for sentiment classification
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Hard ceiling on any single HTTP exchange, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    LlmProvider::OpenAI.default_endpoint().to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.0
}

fn default_http_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl LlmConfig {
    /// Base default without env overrides.
    pub fn base_default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: LlmProvider::default(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }

    /// Check if the config equals the default (for skip_serializing_if).
    pub fn is_default(&self) -> bool {
        *self == Self::base_default()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_ENABLED`: "true" or "false"
    /// - `LLM_PROVIDER`: "openai" (default), "groq", "together", or "ollama"
    /// - `LLM_ENDPOINT`: API base URL (defaults based on provider)
    /// - `LLM_API_KEY`: API key, falling back to `OPENAI_API_KEY`
    /// - `LLM_MODEL`: Model name
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_TEMPERATURE`: Generation temperature (0.0-1.0)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LLM_ENABLED") {
            self.enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }

        let explicit_endpoint = std::env::var("LLM_ENDPOINT").ok();

        if let Ok(val) = std::env::var("LLM_PROVIDER") {
            if let Some(provider) = LlmProvider::from_str(&val) {
                self.provider = provider;
                if explicit_endpoint.is_none() {
                    self.endpoint = match val.to_lowercase().as_str() {
                        "groq" => "https://api.groq.com/openai".to_string(),
                        "together" => "https://api.together.xyz".to_string(),
                        _ => provider.default_endpoint().to_string(),
                    };
                }
            }
        }

        if let Some(endpoint) = explicit_endpoint {
            self.endpoint = endpoint;
        }

        if let Ok(val) = std::env::var("LLM_API_KEY") {
            self.api_key = Some(val);
        } else if self.api_key.is_none() && self.provider == LlmProvider::OpenAI {
            self.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        if let Ok(val) = std::env::var("LLM_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                self.max_tokens = n;
            }
        }
        if let Ok(val) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                self.temperature = t;
            }
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Full URL for an OpenAI-style API path such as `chat/completions`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.endpoint.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(LlmProvider::from_str("Groq"), Some(LlmProvider::OpenAI));
        assert_eq!(LlmProvider::from_str("ollama"), Some(LlmProvider::Ollama));
        assert_eq!(LlmProvider::from_str("bard"), None);
    }

    #[test]
    fn test_api_url() {
        let config = LlmConfig::base_default().with_endpoint("http://localhost:11434/");
        assert_eq!(
            config.api_url("chat/completions"),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = LlmConfig::base_default().with_api_key("sk-secret");
        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("sk-secret"));
        assert!(toml.contains("gpt-3.5-turbo"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LlmConfig = toml::from_str("model = \"llama3.1:8b\"\nprovider = \"ollama\"").unwrap();
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.provider, LlmProvider::Ollama);
        assert_eq!(config.max_tokens, 2048);
        assert!(config.enabled);
    }
}
