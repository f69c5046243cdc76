//! Context Builder: folds heterogeneous research inputs into one text block.
//!
//! Line order is part of the contract. The generation prompt relies on a stable
//! shape, so lines are emitted in a fixed sequence and absent inputs simply
//! contribute nothing.

use crate::error::StrategyError;
use crate::research::{
    CompetitorAnalysis, GapFinding, KeywordInput, KeywordSet, SearchResult, StrategyConfig,
};
use crate::state::PipelineState;

pub const MAX_COMPETITOR_TOPICS: usize = 10;
pub const MAX_PEOPLE_ALSO_ASK: usize = 5;
pub const MAX_CONTENT_GAPS: usize = 3;

/// Borrowed view of everything the context block is built from.
#[derive(Debug, Clone, Copy)]
pub struct ContextInputs<'a> {
    pub strategy: &'a StrategyConfig,
    pub competitor_analysis: &'a CompetitorAnalysis,
    pub search_results: &'a [SearchResult],
    pub content_gaps: &'a [GapFinding],
}

impl<'a> ContextInputs<'a> {
    pub fn from_state(state: &'a PipelineState) -> Self {
        Self {
            strategy: &state.content_strategy,
            competitor_analysis: &state.competitor_analysis,
            search_results: &state.search_results,
            content_gaps: &state.content_gaps,
        }
    }
}

/// Build the context block from raw keyword input.
///
/// Fails only when the keywords carry no primary keyword.
pub fn build_context(
    keywords: &KeywordInput,
    inputs: ContextInputs<'_>,
) -> Result<String, StrategyError> {
    let keywords = keywords.normalize()?;
    Ok(render_context(&keywords, inputs))
}

/// Render the context block for an already normalized keyword set. Infallible.
pub fn render_context(keywords: &KeywordSet, inputs: ContextInputs<'_>) -> String {
    let mut lines = vec![format!("PRIMARY KEYWORD: {}", keywords.primary)];

    push_joined(&mut lines, "SECONDARY KEYWORDS", &keywords.secondary, ", ");
    push_joined(&mut lines, "LSI KEYWORDS", &keywords.lsi, ", ");
    push_joined(&mut lines, "LONGTAIL KEYWORDS", &keywords.longtail, ", ");

    lines.push(format!("CONTENT TYPE: {}", inputs.strategy.content_type_label()));
    lines.push(format!("SEARCH INTENT: {}", inputs.strategy.search_intent_label()));
    lines.push(format!("TARGET WORD COUNT: {}", inputs.strategy.word_count_label()));

    let topics: Vec<&str> = inputs
        .competitor_analysis
        .common_topics()
        .into_iter()
        .take(MAX_COMPETITOR_TOPICS)
        .collect();
    push_joined(&mut lines, "COMPETITOR TOPICS", &topics, ", ");

    if let Some(first) = inputs.search_results.first() {
        let questions: Vec<&str> = first
            .people_also_ask
            .iter()
            .take(MAX_PEOPLE_ALSO_ASK)
            .map(|paa| paa.question.as_str())
            .collect();
        push_joined(&mut lines, "PEOPLE ALSO ASK", &questions, "; ");
    }

    let gaps: Vec<&str> = inputs
        .content_gaps
        .iter()
        .take(MAX_CONTENT_GAPS)
        .map(GapFinding::topic)
        .collect();
    push_joined(&mut lines, "CONTENT GAPS TO ADDRESS", &gaps, "; ");

    lines.join("\n")
}

fn push_joined<S: AsRef<str>>(lines: &mut Vec<String>, label: &str, items: &[S], separator: &str) {
    if items.is_empty() {
        return;
    }
    let joined: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    lines.push(format!("{}: {}", label, joined.join(separator)));
}
