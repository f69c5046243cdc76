//! Strategy Orchestrator
//!
//! Drives one content strategy run over a [`PipelineState`]:
//!
//! ```text
//! Start -> ContextBuilt -> Generated -> Done
//! Start -> ContextBuilt -> Fallback  -> Done
//! ```
//!
//! Only invalid keyword input escapes `run`. Transport and schema failures end
//! in fallback recovery; a panic inside the stage is recorded and answered
//! with the minimal synthetic brief, so the outline slot is always filled.

use crate::brief::ContentBrief;
use crate::config::{GenerationConfig, OutlineConfig};
use crate::error::{ApiError, StrategyError};
use crate::provider::{ModelProviderClient, ProviderFactory};
use crate::research::KeywordSet;
use crate::state::{Outline, PipelineState, CONTENT_STRATEGY_STAGE};
use crate::strategy::context::{render_context, ContextInputs};
use crate::strategy::fallback::{minimal_brief, FallbackRecovery, RecoveryTier};
use crate::strategy::generation::GenerationAdapter;
use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Confidence recorded when constrained generation succeeds.
pub const GENERATED_CONFIDENCE: f64 = 0.9;
/// Confidence recorded whenever any fallback tier produced the brief.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyPhase {
    Start,
    ContextBuilt,
    Generated,
    Fallback,
    Done,
}

impl fmt::Display for StrategyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyPhase::Start => "start",
            StrategyPhase::ContextBuilt => "context_built",
            StrategyPhase::Generated => "generated",
            StrategyPhase::Fallback => "fallback",
            StrategyPhase::Done => "done",
        };
        f.write_str(name)
    }
}

enum StageOutcome {
    Generated(ContentBrief),
    Recovered {
        brief: ContentBrief,
        tier: RecoveryTier,
        reason: StrategyError,
    },
}

/// Content strategy stage of the outline pipeline.
pub struct ContentStrategist {
    client: Arc<dyn ModelProviderClient>,
    settings: GenerationConfig,
}

impl ContentStrategist {
    pub fn new(client: Arc<dyn ModelProviderClient>, settings: GenerationConfig) -> Self {
        Self { client, settings }
    }

    /// Build the provider client described by `config`.
    pub fn from_config(config: &OutlineConfig) -> Result<Self, ApiError> {
        let provider = config.provider.to_model_provider()?;
        let client =
            ProviderFactory::create_client_with_timeout(&provider, config.generation.request_timeout())?;
        Ok(Self::new(Arc::from(client), config.generation.clone()))
    }

    /// Run the stage, mutating `state` in place.
    ///
    /// Writes `outline`, one entry in `errors` when generation failed, and the
    /// `content_strategy` confidence score. Nothing else in the state is touched.
    pub async fn run<'s>(
        &self,
        state: &'s mut PipelineState,
    ) -> Result<&'s mut PipelineState, StrategyError> {
        let keywords = state.keywords.normalize().map_err(|e| {
            warn!(error = %e, "Rejecting content strategy input");
            e
        })?;
        debug!(phase = %StrategyPhase::Start, primary_keyword = %keywords.primary);

        let outcome = AssertUnwindSafe(self.produce(&keywords, state))
            .catch_unwind()
            .await;

        match outcome {
            Ok(StageOutcome::Generated(brief)) => {
                state.outline = Some(Outline::Brief(brief));
                state.record_confidence(CONTENT_STRATEGY_STAGE, GENERATED_CONFIDENCE);
            }
            Ok(StageOutcome::Recovered {
                brief,
                tier,
                reason,
            }) => {
                info!(tier = %tier, "Content outline produced by fallback");
                state.outline = Some(Outline::Brief(brief));
                state.record_error(format!("Failed to generate content outline: {}", reason));
                state.record_confidence(CONTENT_STRATEGY_STAGE, FALLBACK_CONFIDENCE);
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(panic = %message, "Content strategy stage panicked");
                state.outline = Some(Outline::Brief(minimal_brief(&keywords, &state.content_strategy)));
                state.record_error(format!("Content strategy stage failed unexpectedly: {}", message));
                state.record_confidence(CONTENT_STRATEGY_STAGE, FALLBACK_CONFIDENCE);
            }
        }

        debug!(phase = %StrategyPhase::Done);
        Ok(state)
    }

    async fn produce(&self, keywords: &KeywordSet, state: &PipelineState) -> StageOutcome {
        let context = render_context(keywords, ContextInputs::from_state(state));
        debug!(phase = %StrategyPhase::ContextBuilt, context_lines = context.lines().count());

        let client = self.client.as_ref();
        match GenerationAdapter::new(client, &self.settings)
            .generate(&context, keywords)
            .await
        {
            Ok(validated) => {
                debug!(phase = %StrategyPhase::Generated);
                info!(
                    sections = validated.brief.sections.len(),
                    advisories = validated.advisories.len(),
                    "Content outline generated"
                );
                StageOutcome::Generated(validated.brief)
            }
            Err(failure) => {
                debug!(phase = %StrategyPhase::Fallback, cause = %failure.cause);
                let recovery = FallbackRecovery::new(client, &self.settings)
                    .recover(&failure, &context, keywords, &state.content_strategy)
                    .await;
                StageOutcome::Recovered {
                    brief: recovery.brief,
                    tier: recovery.tier,
                    reason: failure.cause,
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
