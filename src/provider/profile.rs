//! Provider profile: the configured inference backend for outline generation.

use crate::error::ApiError;
use crate::provider::ModelProvider;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Ollama,
    #[serde(rename = "local")]
    LocalCustom,
}

impl ProviderType {
    /// Environment variable consulted when no API key is configured.
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderType::Ollama | ProviderType::LocalCustom => None,
        }
    }

    fn requires_api_key(&self) -> bool {
        matches!(self, ProviderType::OpenAI | ProviderType::Anthropic)
    }

    fn is_local(&self) -> bool {
        matches!(self, ProviderType::Ollama | ProviderType::LocalCustom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::OpenAI,
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            endpoint: None,
        }
    }
}

impl ProviderConfig {
    /// Endpoint with a scheme. Local endpoints written as `host:port/path` get `http://`.
    pub fn normalized_endpoint(&self) -> Option<String> {
        let endpoint = self.endpoint.as_deref()?.trim();
        if endpoint.is_empty() {
            return None;
        }
        if has_scheme(endpoint) || !self.provider_type.is_local() {
            return Some(endpoint.to_string());
        }
        Some(format!("http://{}", endpoint))
    }

    pub fn validate(&self) -> Result<(), String> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    fn validate_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if let Some(endpoint) = self.normalized_endpoint() {
            if !has_scheme(&endpoint) || endpoint.split("://").nth(1).map_or(true, str::is_empty) {
                return Err(format!("Invalid endpoint URL: {}", endpoint));
            }
        }
        if self.provider_type == ProviderType::LocalCustom && self.normalized_endpoint().is_none() {
            return Err("Local provider requires an endpoint".to_string());
        }
        if self.provider_type.requires_api_key() && self.resolve_api_key(&lookup).is_none() {
            return Err(format!(
                "API key required: set api_key or {}",
                self.provider_type.api_key_env_var().unwrap_or("an API key variable")
            ));
        }
        Ok(())
    }

    fn resolve_api_key(&self, lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.provider_type.api_key_env_var().and_then(lookup))
            .filter(|key| !key.trim().is_empty())
    }

    /// Convert to the client factory input, resolving the API key from the environment.
    pub fn to_model_provider(&self) -> Result<ModelProvider, ApiError> {
        self.to_model_provider_with(|name| std::env::var(name).ok())
    }

    fn to_model_provider_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ModelProvider, ApiError> {
        self.validate_with(&lookup)
            .map_err(ApiError::ProviderNotConfigured)?;
        let api_key = self.resolve_api_key(&lookup);
        let model = self.model.clone();
        let endpoint = self.normalized_endpoint();

        Ok(match self.provider_type {
            ProviderType::OpenAI => ModelProvider::OpenAI {
                model,
                api_key: api_key.unwrap_or_default(),
                base_url: endpoint,
            },
            ProviderType::Anthropic => ModelProvider::Anthropic {
                model,
                api_key: api_key.unwrap_or_default(),
                base_url: endpoint,
            },
            ProviderType::Ollama => ModelProvider::Ollama {
                model,
                base_url: endpoint,
            },
            ProviderType::LocalCustom => ModelProvider::LocalCustom {
                model,
                endpoint: endpoint.unwrap_or_default(),
                api_key,
            },
        })
    }
}

fn has_scheme(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}
