//! Merge rules: defaults first, every later source overrides key by key.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Create a Config builder with built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.provider_type", "openai")?
        .set_default("provider.model", "gpt-4o-mini")?
        .set_default("generation.temperature", 0.2)?
        .set_default("generation.max_tokens", 4096)?
        .set_default("generation.request_timeout_secs", 120)
}

/// Environment overrides, e.g. `SEO_OUTLINE__PROVIDER__MODEL=llama3`.
pub fn environment_source() -> Environment {
    Environment::with_prefix("SEO_OUTLINE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
