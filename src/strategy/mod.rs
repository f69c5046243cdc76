//! Content strategy stage: context assembly, generation, validated parse and
//! fallback recovery.

pub mod context;
pub mod fallback;
pub mod generation;
pub mod orchestrator;
pub mod prompt;

pub use context::{build_context, render_context, ContextInputs};
pub use fallback::{extract_brief, minimal_brief, FallbackRecovery, Recovery, RecoveryTier};
pub use generation::{GenerationAdapter, GenerationFailure};
pub use orchestrator::{ContentStrategist, StrategyPhase, FALLBACK_CONFIDENCE, GENERATED_CONFIDENCE};
