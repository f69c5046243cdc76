//! Shared test utilities for integration tests
//!
//! Scripted provider, brief fixtures and environment isolation helpers.

use async_trait::async_trait;
use seo_outline::error::ApiError;
use seo_outline::provider::{
    ChatMessage, CompletionOptions, CompletionResponse, ModelProviderClient, TokenUsage,
};
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// One scripted provider reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Unreachable,
    /// Answer after sleeping, to exercise request timeouts.
    Slow(Duration, String),
}

/// Provider that replays a fixed script and records every request.
pub struct ScriptedProvider {
    script: Mutex<Vec<Reply>>,
    seen: Mutex<Vec<CompletionOptions>>,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedProvider {
    pub fn new(mut script: Vec<Reply>) -> Self {
        script.reverse();
        Self {
            script: Mutex::new(script),
            seen: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn options(&self) -> Vec<CompletionOptions> {
        self.seen.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<Vec<ChatMessage>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProviderClient for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        self.seen.lock().unwrap().push(options);
        self.prompts.lock().unwrap().push(messages);
        let reply = self.script.lock().unwrap().pop().unwrap_or(Reply::Unreachable);

        let content = match reply {
            Reply::Text(text) => text,
            Reply::Unreachable => {
                return Err(ApiError::ProviderRequestFailed(
                    "Connection error: scripted outage".to_string(),
                ))
            }
            Reply::Slow(delay, text) => {
                tokio::time::sleep(delay).await;
                text
            }
        };

        Ok(CompletionResponse {
            content,
            model: "scripted".to_string(),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// A brief for "sourdough bread" that satisfies every structural rule.
pub fn valid_brief_json() -> Value {
    json!({
        "title": "Sourdough Bread at Home: From Starter to Crumb",
        "meta_description": "Everything a home baker needs for open-crumb sourdough bread.",
        "content_type": "how_to",
        "search_intent": "informational",
        "target_audience": "home bakers",
        "total_word_count": 2400,
        "sections": [
            {
                "section_id": "starter",
                "section_title": "Building a Starter That Actually Rises",
                "short_description": "Feeding ratios and timelines",
                "target_keywords": ["sourdough starter"],
                "suggested_word_count": 500,
                "subsections": ["Flour choice", "Feeding schedule"],
                "research_notes": ["Cite hydration ratios"]
            },
            {
                "section_id": "shaping",
                "section_title": "Shaping for Surface Tension",
                "short_description": "Pre-shape, bench rest and final shape",
                "target_keywords": ["shaping sourdough"],
                "suggested_word_count": 700
            }
        ],
        "faqs": [
            {
                "question": "Why is my sourdough dense?",
                "answer_brief": "Usually under-proofing or a weak starter.",
                "target_keywords": ["dense sourdough"]
            }
        ],
        "content_gaps_addressed": [
            {
                "topic": "High altitude baking",
                "description": "No competitor covers altitude adjustments",
                "opportunity_score": 8
            }
        ],
        "internal_link_opportunities": ["/guides/bread-flour"]
    })
}

/// Pipeline state JSON as upstream research stages hand it over.
pub fn research_state_json() -> Value {
    json!({
        "keywords": {
            "primary": "sourdough bread",
            "secondary": ["sourdough starter", "bread baking"],
            "lsi": ["levain", "hydration"],
            "longtail": ["how to make sourdough bread without a scale"]
        },
        "content_strategy": {
            "content_type": "guide",
            "search_intent": "informational",
            "estimated_word_count": 3000,
            "tone": "friendly"
        },
        "competitor_analysis": {
            "common_topics": ["starter", "hydration", "scoring"],
            "average_word_count": 2100
        },
        "search_results": [
            {
                "query": "sourdough bread",
                "people_also_ask": [
                    {"question": "Is sourdough bread healthy?"},
                    {"question": "How long does sourdough take?"}
                ]
            }
        ],
        "content_gaps": [
            {"topic": "High altitude baking", "description": "Missing", "opportunity_score": 8}
        ],
        "errors": [],
        "confidence_scores": {"keyword_research": 0.8}
    })
}

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &["HOME", "XDG_CONFIG_HOME", "SEO_OUTLINE_ENV"];

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir` and
/// `extra` variables set, restoring the original environment afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, extra: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let names: Vec<&str> = ISOLATED_VARS
        .iter()
        .copied()
        .chain(extra.iter().map(|(name, _)| *name))
        .collect();
    let originals: Vec<(String, Option<String>)> = names
        .iter()
        .map(|name| (name.to_string(), std::env::var(name).ok()))
        .collect();

    let home = test_dir.path().join("home");
    let config_home = test_dir.path().join("xdg");
    std::fs::create_dir_all(&home).unwrap();
    std::fs::create_dir_all(&config_home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::remove_var("SEO_OUTLINE_ENV");
    for (name, value) in extra {
        std::env::set_var(name, value);
    }

    let result = f();

    for (name, original) in originals {
        match original {
            Some(value) => std::env::set_var(&name, value),
            None => std::env::remove_var(&name),
        }
    }
    result
}
