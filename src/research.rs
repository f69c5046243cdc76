//! Upstream research inputs
//!
//! Keyword sets, strategy settings, competitor signals and search-result
//! snapshots as produced by the research stages. All of these are read-only to
//! the content strategy stage.

use crate::brief::{ContentType, SearchIntent};
use crate::error::StrategyError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_CONTENT_TYPE: &str = "guide";
pub const DEFAULT_SEARCH_INTENT: &str = "informational";
pub const DEFAULT_WORD_COUNT: u32 = 2500;
pub const DEFAULT_TARGET_AUDIENCE: &str = "general audience";

/// Canonical keyword set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub primary: String,
    #[serde(default)]
    pub secondary: Vec<String>,
    #[serde(default)]
    pub lsi: Vec<String>,
    #[serde(default)]
    pub longtail: Vec<String>,
}

impl KeywordSet {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            ..Self::default()
        }
    }
}

/// Keywords as handed over by the research stages: either a loose key-value
/// mapping or an already typed set.
///
/// JSON input always arrives as `Mapping`. `Typed` is for callers that build
/// the set in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordInput {
    Mapping(Map<String, Value>),
    Typed(KeywordSet),
}

impl KeywordInput {
    /// Convert either shape into the canonical set.
    ///
    /// The mapping shape never carries longtail keywords through; only a typed
    /// set does.
    pub fn normalize(&self) -> Result<KeywordSet, StrategyError> {
        match self {
            KeywordInput::Typed(set) => {
                require_primary(&set.primary)?;
                Ok(set.clone())
            }
            KeywordInput::Mapping(map) => {
                let primary = match map.get("primary") {
                    Some(Value::String(s)) => s.clone(),
                    _ => String::new(),
                };
                require_primary(&primary)?;
                Ok(KeywordSet {
                    primary,
                    secondary: string_items(map.get("secondary")),
                    lsi: string_items(map.get("lsi")),
                    longtail: Vec::new(),
                })
            }
        }
    }
}

impl From<KeywordSet> for KeywordInput {
    fn from(set: KeywordSet) -> Self {
        KeywordInput::Typed(set)
    }
}

impl From<Map<String, Value>> for KeywordInput {
    fn from(map: Map<String, Value>) -> Self {
        KeywordInput::Mapping(map)
    }
}

fn require_primary(primary: &str) -> Result<(), StrategyError> {
    if primary.trim().is_empty() {
        return Err(StrategyError::InvalidInput(
            "keyword set has no primary keyword".to_string(),
        ));
    }
    Ok(())
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Loosely typed strategy settings. Unknown keys are carried but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyConfig(Map<String, Value>);

impl StrategyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Value rendered as text for the context block, or `default` when absent.
    fn label(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    pub fn content_type_label(&self) -> String {
        self.label("content_type", DEFAULT_CONTENT_TYPE)
    }

    pub fn search_intent_label(&self) -> String {
        self.label("search_intent", DEFAULT_SEARCH_INTENT)
    }

    pub fn word_count_label(&self) -> String {
        self.label("estimated_word_count", &DEFAULT_WORD_COUNT.to_string())
    }

    pub fn target_audience(&self) -> String {
        self.label("target_audience", DEFAULT_TARGET_AUDIENCE)
    }

    pub fn content_type(&self) -> ContentType {
        ContentType::from_loose(&self.content_type_label())
    }

    pub fn search_intent(&self) -> SearchIntent {
        SearchIntent::from_loose(&self.search_intent_label())
    }

    /// Non-negative integer or numeric string; anything else yields the default.
    pub fn estimated_word_count(&self) -> u32 {
        match self.0.get("estimated_word_count") {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(DEFAULT_WORD_COUNT),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(DEFAULT_WORD_COUNT),
            _ => DEFAULT_WORD_COUNT,
        }
    }
}

impl From<Map<String, Value>> for StrategyConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Competitor analysis output; only `common_topics` is read here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorAnalysis(Map<String, Value>);

impl CompetitorAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_common_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let topics: Vec<Value> = topics.into_iter().map(|t| Value::String(t.into())).collect();
        self.0.insert("common_topics".to_string(), Value::Array(topics));
        self
    }

    pub fn common_topics(&self) -> Vec<&str> {
        self.0
            .get("common_topics")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for CompetitorAnalysis {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A content gap found upstream; only `topic` is read here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GapFinding(Map<String, Value>);

impl GapFinding {
    pub fn new(topic: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("topic".to_string(), Value::String(topic.into()));
        Self(map)
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Empty when the finding carries no string topic.
    pub fn topic(&self) -> &str {
        self.0.get("topic").and_then(Value::as_str).unwrap_or("")
    }
}

impl From<Map<String, Value>> for GapFinding {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Treats an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One "people also ask" entry from a search result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeopleAlsoAsk {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search-result snapshot for one query. Fields other than
/// `people_also_ask` are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub people_also_ask: Vec<PeopleAlsoAsk>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResult {
    pub fn with_questions<I, S>(questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            people_also_ask: questions
                .into_iter()
                .map(|q| PeopleAlsoAsk {
                    question: q.into(),
                    extra: Map::new(),
                })
                .collect(),
            extra: Map::new(),
        }
    }
}
