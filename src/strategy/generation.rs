//! Generation Adapter: one schema-constrained inference request, parsed and validated.
//!
//! No retries happen here. A failure hands control to fallback recovery along
//! with whatever response text was obtained.

use crate::brief::{brief_json_schema, BriefValidator, ValidatedBrief};
use crate::config::GenerationConfig;
use crate::error::StrategyError;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient, ResponseSchema};
use crate::research::KeywordSet;
use crate::strategy::prompt::outline_messages;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name attached to the advisory response schema.
pub const RESPONSE_SCHEMA_NAME: &str = "content_brief";

/// Why constrained generation did not yield a brief.
///
/// `raw_response` is present when the service answered but the text failed
/// parsing, and absent when the request itself failed.
#[derive(Debug, Error)]
#[error("{cause}")]
pub struct GenerationFailure {
    pub raw_response: Option<String>,
    pub cause: StrategyError,
}

impl GenerationFailure {
    pub fn transport(cause: StrategyError) -> Self {
        Self {
            raw_response: None,
            cause,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.cause, StrategyError::TransportFailure(_))
    }
}

pub struct GenerationAdapter<'a> {
    client: &'a dyn ModelProviderClient,
    settings: &'a GenerationConfig,
}

impl<'a> GenerationAdapter<'a> {
    pub fn new(client: &'a dyn ModelProviderClient, settings: &'a GenerationConfig) -> Self {
        Self { client, settings }
    }

    /// Completion options for the constrained request.
    pub fn constrained_options(&self) -> CompletionOptions {
        self.settings.completion_options(Some(ResponseSchema {
            name: RESPONSE_SCHEMA_NAME.to_string(),
            schema: brief_json_schema(),
        }))
    }

    pub async fn generate(
        &self,
        context: &str,
        keywords: &KeywordSet,
    ) -> Result<ValidatedBrief, GenerationFailure> {
        let text = request_text(
            self.client,
            outline_messages(context),
            self.constrained_options(),
            self.settings.request_timeout(),
        )
        .await
        .map_err(GenerationFailure::transport)?;

        match BriefValidator::with_primary_keyword(&keywords.primary).parse_response(&text) {
            Ok(validated) => {
                debug!(
                    sections = validated.brief.sections.len(),
                    faqs = validated.brief.faqs.len(),
                    "Constrained response validated"
                );
                Ok(validated)
            }
            Err(violation) => {
                warn!(
                    violations = violation.violations.len(),
                    error = %violation,
                    "Constrained response failed validation"
                );
                Err(GenerationFailure {
                    raw_response: Some(text),
                    cause: StrategyError::SchemaViolation(violation),
                })
            }
        }
    }
}

/// One inference round trip bounded by `timeout`. Any failure, expiry
/// included, is a transport failure.
pub(crate) async fn request_text(
    client: &dyn ModelProviderClient,
    messages: Vec<ChatMessage>,
    options: CompletionOptions,
    timeout: Duration,
) -> Result<String, StrategyError> {
    let constrained = options.response_schema.is_some();
    let start = Instant::now();
    info!(
        provider = client.provider_name(),
        model = client.model_name(),
        constrained,
        message_count = messages.len(),
        "Provider request sent"
    );

    let response = match tokio::time::timeout(timeout, client.complete(messages, options)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            warn!(
                provider = client.provider_name(),
                duration_ms = start.elapsed().as_millis() as u64,
                error = %e,
                "Provider request failed"
            );
            return Err(e.into());
        }
        Err(_) => {
            warn!(
                provider = client.provider_name(),
                timeout_secs = timeout.as_secs(),
                "Provider request timed out"
            );
            return Err(StrategyError::TransportFailure(format!(
                "request timed out after {}s",
                timeout.as_secs()
            )));
        }
    };

    info!(
        provider = client.provider_name(),
        duration_ms = start.elapsed().as_millis() as u64,
        completion_tokens = response.usage.completion_tokens,
        "Provider response received"
    );
    Ok(response.content)
}
