//! Configuration for inference engine

use serde::{Deserialize, Serialize};

/// Configuration for the chat-completion inference engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the OpenAI-compatible server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer API key; omit for keyless local backends
    #[serde(default)]
    pub api_key: Option<String>,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

const fn default_max_tokens() -> u32 {
    2048
}

const fn default_temperature() -> f32 {
    0.7
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl InferenceConfig {
    /// Config for the hosted OpenAI API with the given key
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Config for a keyless local backend at the given base URL
    pub fn local(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = InferenceConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.default_model, "gpt-4o-mini");
        assert_eq!(config.timeout_ms, 60000);
        assert_eq!(config.max_tokens, 2048);
        assert!((config.temperature - 0.7).abs() < 0.01);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn openai_config_carries_key() {
        let config = InferenceConfig::openai("sk-test");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "https://api.openai.com");
    }

    #[test]
    fn local_config_is_keyless() {
        let config = InferenceConfig::local("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn config_deserialization_with_defaults() {
        let json = r#"{}"#;
        let config: InferenceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.timeout_ms, 60000);
    }

    #[test]
    fn config_deserialization_overrides() {
        let json = r#"{"base_url":"http://custom:8080","default_model":"my-model"}"#;
        let config: InferenceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://custom:8080");
        assert_eq!(config.default_model, "my-model");
    }

    #[test]
    fn config_serialization() {
        let config = InferenceConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("base_url"));
        assert!(json.contains("default_model"));
    }
}
