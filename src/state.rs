//! Pipeline state shared by the stages of one outline run.
//!
//! Ownership rule: exactly one orchestrator mutates a given state per run. Stages
//! read their inputs from it and write only their own output slots.

use crate::brief::{BriefValidator, ContentBrief};
use crate::research::{
    null_as_default, CompetitorAnalysis, GapFinding, KeywordInput, SearchResult, StrategyConfig,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key under which the content strategy stage records its confidence.
pub const CONTENT_STRATEGY_STAGE: &str = "content_strategy";

/// The outline slot: a typed brief, or a raw mapping shaped like one.
///
/// Raw values only appear when a state is loaded from elsewhere; the content
/// strategy stage always writes `Brief`. A loaded mapping becomes `Brief` only
/// when it passes the brief validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outline {
    Brief(ContentBrief),
    Raw(Map<String, Value>),
}

impl<'de> Deserialize<'de> for Outline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Outline::from)
    }
}

impl From<Map<String, Value>> for Outline {
    fn from(map: Map<String, Value>) -> Self {
        match BriefValidator::new().validate_value(&Value::Object(map.clone())) {
            Ok(validated) => Outline::Brief(validated.brief),
            Err(_) => Outline::Raw(map),
        }
    }
}

impl Outline {
    pub fn as_brief(&self) -> Option<&ContentBrief> {
        match self {
            Outline::Brief(brief) => Some(brief),
            Outline::Raw(_) => None,
        }
    }

    /// Best-effort typed view: a raw mapping is promoted when it validates.
    pub fn to_brief(&self) -> Option<ContentBrief> {
        match self {
            Outline::Brief(brief) => Some(brief.clone()),
            Outline::Raw(map) => BriefValidator::new()
                .validate_value(&Value::Object(map.clone()))
                .ok()
                .map(|validated| validated.brief),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub keywords: KeywordInput,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_strategy: StrategyConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    pub competitor_analysis: CompetitorAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_results: Vec<SearchResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_gaps: Vec<GapFinding>,
    #[serde(default)]
    pub outline: Option<Outline>,
    /// Append-only.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Stage name to confidence in [0, 1].
    #[serde(default)]
    pub confidence_scores: BTreeMap<String, f64>,
}

impl PipelineState {
    pub fn new(keywords: impl Into<KeywordInput>) -> Self {
        Self {
            keywords: keywords.into(),
            content_strategy: StrategyConfig::default(),
            competitor_analysis: CompetitorAnalysis::default(),
            search_results: Vec::new(),
            content_gaps: Vec::new(),
            outline: None,
            errors: Vec::new(),
            confidence_scores: BTreeMap::new(),
        }
    }

    pub fn with_strategy(mut self, config: StrategyConfig) -> Self {
        self.content_strategy = config;
        self
    }

    pub fn with_competitor_analysis(mut self, analysis: CompetitorAnalysis) -> Self {
        self.competitor_analysis = analysis;
        self
    }

    pub fn with_search_results(mut self, results: Vec<SearchResult>) -> Self {
        self.search_results = results;
        self
    }

    pub fn with_content_gaps(mut self, gaps: Vec<GapFinding>) -> Self {
        self.content_gaps = gaps;
        self
    }

    pub fn brief(&self) -> Option<&ContentBrief> {
        self.outline.as_ref().and_then(Outline::as_brief)
    }

    pub fn confidence(&self, stage: &str) -> Option<f64> {
        self.confidence_scores.get(stage).copied()
    }

    pub(crate) fn record_confidence(&mut self, stage: &str, score: f64) {
        self.confidence_scores
            .insert(stage.to_string(), score.clamp(0.0, 1.0));
    }

    pub(crate) fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}
