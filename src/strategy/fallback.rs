//! Fallback Recovery: three tiers, first success wins.
//!
//! 1. Reuse the rejected response text, or issue one unconstrained re-request
//!    when the constrained request never produced text.
//! 2. Extract the first embedded JSON object and validate it as a brief.
//! 3. Build the minimal synthetic brief from the keywords and strategy alone.
//!
//! Tier 3 makes no calls and parses nothing, so recovery always yields a brief.

pub mod extract;

use crate::brief::{title_case, BriefValidator, ContentBrief, OutlineSection};
use crate::config::GenerationConfig;
use crate::error::StrategyError;
use crate::provider::ModelProviderClient;
use crate::research::{KeywordSet, StrategyConfig};
use crate::strategy::generation::{request_text, GenerationAdapter, GenerationFailure};
use crate::strategy::prompt::outline_messages;
use std::fmt;
use tracing::{debug, info, warn};

pub const MINIMAL_SECTION_ID: &str = "introduction";
pub const MINIMAL_SECTION_WORD_COUNT: u32 = 300;

/// Where a recovered brief came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryTier {
    /// Extracted from response text (tiers 1 and 2).
    Extracted,
    /// Minimal synthetic brief (tier 3).
    Minimal,
}

impl fmt::Display for RecoveryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryTier::Extracted => write!(f, "extracted"),
            RecoveryTier::Minimal => write!(f, "minimal"),
        }
    }
}

#[derive(Debug)]
pub struct Recovery {
    pub brief: ContentBrief,
    pub tier: RecoveryTier,
    /// Why the extraction tiers were skipped past, when they were.
    pub extraction_error: Option<StrategyError>,
}

pub struct FallbackRecovery<'a> {
    client: &'a dyn ModelProviderClient,
    settings: &'a GenerationConfig,
}

impl<'a> FallbackRecovery<'a> {
    pub fn new(client: &'a dyn ModelProviderClient, settings: &'a GenerationConfig) -> Self {
        Self { client, settings }
    }

    pub async fn recover(
        &self,
        failure: &GenerationFailure,
        context: &str,
        keywords: &KeywordSet,
        strategy: &StrategyConfig,
    ) -> Recovery {
        match self.try_extract(failure, context, keywords).await {
            Ok(brief) => {
                info!(tier = %RecoveryTier::Extracted, "Recovered brief from response text");
                Recovery {
                    brief,
                    tier: RecoveryTier::Extracted,
                    extraction_error: None,
                }
            }
            Err(e) => {
                debug!(error = %e, "Extraction tiers exhausted");
                info!(tier = %RecoveryTier::Minimal, "Using minimal synthetic brief");
                Recovery {
                    brief: minimal_brief(keywords, strategy),
                    tier: RecoveryTier::Minimal,
                    extraction_error: Some(e),
                }
            }
        }
    }

    async fn try_extract(
        &self,
        failure: &GenerationFailure,
        context: &str,
        keywords: &KeywordSet,
    ) -> Result<ContentBrief, StrategyError> {
        let text = match failure.raw_response.as_deref() {
            Some(text) if !failure.is_transport() => {
                debug!("Reusing rejected response text for extraction");
                text.to_string()
            }
            _ => {
                warn!(cause = %failure.cause, "Issuing unconstrained re-request");
                let options = GenerationAdapter::new(self.client, self.settings)
                    .constrained_options()
                    .unconstrained();
                request_text(
                    self.client,
                    outline_messages(context),
                    options,
                    self.settings.request_timeout(),
                )
                .await?
            }
        };

        extract_brief(&text, keywords)
    }
}

/// Tier 2: pull the first embedded object out of `text` and validate it.
pub fn extract_brief(text: &str, keywords: &KeywordSet) -> Result<ContentBrief, StrategyError> {
    let value = extract::first_object(text)?;
    let validated = BriefValidator::with_primary_keyword(&keywords.primary).validate_value(&value)?;
    Ok(validated.brief)
}

/// Tier 3: deterministic brief built from the primary keyword and strategy settings.
pub fn minimal_brief(keywords: &KeywordSet, strategy: &StrategyConfig) -> ContentBrief {
    let primary = keywords.primary.as_str();
    let titled = title_case(primary);

    ContentBrief {
        title: format!("Complete Guide to {}", titled),
        meta_description: format!(
            "Discover everything about {}. Expert insights and recommendations.",
            primary
        ),
        content_type: strategy.content_type(),
        search_intent: strategy.search_intent(),
        target_audience: strategy.target_audience(),
        total_word_count: strategy.estimated_word_count(),
        sections: vec![OutlineSection {
            section_id: MINIMAL_SECTION_ID.to_string(),
            section_title: format!("What is {}?", titled),
            short_description: "Introduction and overview".to_string(),
            target_keywords: vec![primary.to_string()],
            suggested_word_count: MINIMAL_SECTION_WORD_COUNT,
            subsections: vec!["Overview".to_string(), "Key Benefits".to_string()],
            research_notes: vec!["Define the topic clearly".to_string()],
        }],
        faqs: Vec::new(),
        content_gaps_addressed: Vec::new(),
        internal_link_opportunities: Vec::new(),
    }
}
