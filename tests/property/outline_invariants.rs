//! Every run leaves an outline that satisfies the brief invariants

use async_trait::async_trait;
use proptest::prelude::*;
use seo_outline::brief::BriefValidator;
use seo_outline::config::GenerationConfig;
use seo_outline::error::ApiError;
use seo_outline::provider::{
    ChatMessage, CompletionOptions, CompletionResponse, ModelProviderClient, TokenUsage,
};
use seo_outline::research::{KeywordSet, StrategyConfig};
use seo_outline::state::{PipelineState, CONTENT_STRATEGY_STAGE};
use seo_outline::strategy::ContentStrategist;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Replies in order; `None` is an outage.
struct ReplayProvider {
    replies: Mutex<Vec<Option<String>>>,
}

#[async_trait]
impl ModelProviderClient for ReplayProvider {
    async fn complete(
        &self,
        _messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let next = {
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                None
            } else {
                replies.remove(0)
            }
        };
        match next {
            Some(content) => Ok(CompletionResponse {
                content,
                model: "replay".to_string(),
                usage: TokenUsage::default(),
                finish_reason: None,
            }),
            None => Err(ApiError::ProviderRequestFailed("outage".to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        "replay"
    }

    fn model_name(&self) -> &str {
        "replay"
    }
}

fn brief_text(word_count: u32, content_type: &str, wrap: bool) -> String {
    let body = json!({
        "title": "Generated Title",
        "meta_description": "Generated description",
        "content_type": content_type,
        "search_intent": "informational",
        "target_audience": "readers",
        "total_word_count": 2000,
        "sections": [{
            "section_id": "s1",
            "section_title": "First",
            "short_description": "First section",
            "target_keywords": [],
            "suggested_word_count": word_count
        }],
        "faqs": [],
        "content_gaps_addressed": []
    })
    .to_string();
    if wrap {
        format!("Here it is: {} -- end", body)
    } else {
        body
    }
}

fn reply() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[ -~]{0,40}".prop_map(Some),
        (0u32..3000, prop::sample::select(vec!["how_to", "review", "guide"]), any::<bool>())
            .prop_map(|(count, kind, wrap)| Some(brief_text(count, kind, wrap))),
        Just(Some("{\"title\": \"truncated".to_string())),
    ]
}

fn strategy_config() -> impl Strategy<Value = StrategyConfig> {
    (
        prop::option::of(prop::sample::select(vec!["guide", "how-to", "listicle", "podcast"])),
        prop::option::of(prop::sample::select(vec!["commercial", "navigational", "unknown"])),
        prop::option::of(0u32..10_000),
    )
        .prop_map(|(content_type, intent, words)| {
            let mut config = StrategyConfig::new();
            if let Some(content_type) = content_type {
                config = config.with("content_type", content_type);
            }
            if let Some(intent) = intent {
                config = config.with("search_intent", intent);
            }
            if let Some(words) = words {
                config = config.with("estimated_word_count", words);
            }
            config
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_every_run_leaves_valid_outline(
        primary in "[a-z][a-z ]{0,15}[a-z]",
        strategy in strategy_config(),
        first in reply(),
        second in reply(),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let provider = Arc::new(ReplayProvider {
            replies: Mutex::new(vec![first, second]),
        });
        let strategist = ContentStrategist::new(provider, GenerationConfig::default());
        let mut state = PipelineState::new(KeywordSet::new(primary)).with_strategy(strategy);

        rt.block_on(strategist.run(&mut state)).unwrap();

        let brief = state.brief().expect("outline always populated");
        prop_assert!(!brief.sections.is_empty());
        prop_assert!(BriefValidator::new().validate_brief(brief).is_ok());

        let confidence = state.confidence(CONTENT_STRATEGY_STAGE).unwrap();
        if state.errors.is_empty() {
            prop_assert_eq!(confidence, 0.9);
        } else {
            prop_assert_eq!(state.errors.len(), 1);
            prop_assert_eq!(confidence, 0.3);
        }
    }
}
