//! Property-based tests for context determinism guarantees

use proptest::prelude::*;
use seo_outline::research::{
    CompetitorAnalysis, GapFinding, KeywordSet, SearchResult, StrategyConfig,
};
use seo_outline::strategy::{render_context, ContextInputs};

fn keyword() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,20}[a-z]"
}

fn keyword_set() -> impl Strategy<Value = KeywordSet> {
    (
        keyword(),
        prop::collection::vec(keyword(), 0..5),
        prop::collection::vec(keyword(), 0..5),
        prop::collection::vec(keyword(), 0..3),
    )
        .prop_map(|(primary, secondary, lsi, longtail)| KeywordSet {
            primary,
            secondary,
            lsi,
            longtail,
        })
}

fn gaps() -> impl Strategy<Value = Vec<GapFinding>> {
    prop::collection::vec(
        (keyword(), 1u8..=10).prop_map(|(topic, opportunity_score)| {
            GapFinding::new(topic.clone())
                .with("description", format!("{} is thin", topic))
                .with("opportunity_score", opportunity_score)
        }),
        0..6,
    )
}

proptest! {
    /// Same inputs always render byte-identical context
    #[test]
    fn test_context_is_deterministic(
        keywords in keyword_set(),
        topics in prop::collection::vec(keyword(), 0..15),
        questions in prop::collection::vec(keyword(), 0..8),
        gaps in gaps(),
    ) {
        let strategy = StrategyConfig::new();
        let analysis = CompetitorAnalysis::new().with_common_topics(topics);
        let results = vec![SearchResult::with_questions(questions)];
        let inputs = ContextInputs {
            strategy: &strategy,
            competitor_analysis: &analysis,
            search_results: &results,
            content_gaps: &gaps,
        };

        let first = render_context(&keywords, inputs);
        let second = render_context(&keywords, inputs);
        prop_assert_eq!(first, second);
    }

    /// With no optional inputs only the primary line and the three strategy lines remain
    #[test]
    fn test_optional_inputs_are_independent(primary in keyword()) {
        let strategy = StrategyConfig::new();
        let analysis = CompetitorAnalysis::new();
        let context = render_context(
            &KeywordSet::new(primary.clone()),
            ContextInputs {
                strategy: &strategy,
                competitor_analysis: &analysis,
                search_results: &[],
                content_gaps: &[],
            },
        );
        let lines: Vec<&str> = context.lines().collect();
        prop_assert_eq!(lines.len(), 4);
        prop_assert_eq!(lines[0].to_string(), format!("PRIMARY KEYWORD: {}", primary));
        prop_assert!(lines[1].starts_with("CONTENT TYPE: "));
        prop_assert!(lines[2].starts_with("SEARCH INTENT: "));
        prop_assert!(lines[3].starts_with("TARGET WORD COUNT: "));
    }

    /// Limits hold no matter how much upstream data arrives
    #[test]
    fn test_context_respects_item_limits(
        topics in prop::collection::vec(keyword(), 0..30),
        questions in prop::collection::vec(keyword(), 0..12),
        gaps in gaps(),
    ) {
        let strategy = StrategyConfig::new();
        let analysis = CompetitorAnalysis::new().with_common_topics(topics.clone());
        let results = vec![SearchResult::with_questions(questions.clone())];
        let context = render_context(
            &KeywordSet::new("x"),
            ContextInputs {
                strategy: &strategy,
                competitor_analysis: &analysis,
                search_results: &results,
                content_gaps: &gaps,
            },
        );

        let field = |label: &str| {
            context
                .lines()
                .find_map(|line| line.strip_prefix(label).map(str::to_string))
        };
        if let Some(line) = field("COMPETITOR TOPICS: ") {
            prop_assert_eq!(line.split(", ").count(), topics.len().min(10));
        } else {
            prop_assert!(topics.is_empty());
        }
        if let Some(line) = field("PEOPLE ALSO ASK: ") {
            prop_assert_eq!(line.split("; ").count(), questions.len().min(5));
        } else {
            prop_assert!(questions.is_empty());
        }
        if let Some(line) = field("CONTENT GAPS TO ADDRESS: ") {
            prop_assert_eq!(line.split("; ").count(), gaps.len().min(3));
        } else {
            prop_assert!(gaps.is_empty());
        }
    }
}
