//! Provider clients against a local mock HTTP server

use crate::integration::test_utils::valid_brief_json;
use seo_outline::config::GenerationConfig;
use seo_outline::error::ApiError;
use seo_outline::provider::{ChatMessage, CompletionOptions, ModelProvider, ProviderFactory};
use seo_outline::research::KeywordSet;
use seo_outline::state::{PipelineState, CONTENT_STRATEGY_STAGE};
use seo_outline::strategy::ContentStrategist;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_completion(content: &str) -> Value {
    json!({
        "model": "local-model",
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 34, "total_tokens": 46 }
    })
}

fn local_provider(server: &MockServer) -> ModelProvider {
    ModelProvider::LocalCustom {
        model: "local-model".to_string(),
        endpoint: format!("{}/v1", server.uri()),
        api_key: Some("secret".to_string()),
    }
}

#[tokio::test]
async fn test_local_client_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer secret"))
        .and(body_partial_json(json!({ "model": "local-model", "stream": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProviderFactory::create_client(&local_provider(&server)).unwrap();
    let response = client
        .complete(vec![ChatMessage::user("hi")], CompletionOptions::default())
        .await
        .unwrap();
    assert_eq!(response.content, "hello");
    assert_eq!(response.usage.total_tokens, 46);
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::ProviderAuthFailed(_) => "auth",
        ApiError::ProviderRateLimit(_) => "rate_limit",
        ApiError::ProviderModelNotFound(_) => "model_not_found",
        ApiError::ProviderRequestFailed(_) => "request_failed",
        _ => "other",
    }
}

#[tokio::test]
async fn test_status_codes_map_to_provider_errors() {
    for (status, expected) in [
        (401u16, "auth"),
        (429, "rate_limit"),
        (404, "model_not_found"),
        (500, "request_failed"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .mount(&server)
            .await;

        let client = ProviderFactory::create_client(&local_provider(&server)).unwrap();
        let err = client
            .complete(vec![ChatMessage::user("hi")], CompletionOptions::default())
            .await
            .unwrap_err();
        assert_eq!(error_kind(&err), expected, "status {} mapped to {:?}", status, err);
    }
}

#[tokio::test]
async fn test_anthropic_client_uses_messages_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "anthropic-key"))
        .and(body_partial_json(json!({ "system": "be brief" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "claude-test",
            "content": [{ "type": "text", "text": "part one " }, { "type": "text", "text": "part two" }],
            "usage": { "input_tokens": 3, "output_tokens": 4 },
            "stop_reason": "end_turn"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ModelProvider::Anthropic {
        model: "claude-test".to_string(),
        api_key: "anthropic-key".to_string(),
        base_url: Some(format!("{}/v1", server.uri())),
    };
    let client = ProviderFactory::create_client(&provider).unwrap();
    let response = client
        .complete(
            vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
            CompletionOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(response.content, "part one part two");
    assert_eq!(response.usage.total_tokens, 7);
}

#[tokio::test]
async fn test_pipeline_over_http_sends_schema_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "temperature": 0.2,
            "response_format": { "type": "json_schema", "json_schema": { "name": "content_brief" } }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion(&valid_brief_json().to_string())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ProviderFactory::create_client(&local_provider(&server)).unwrap();
    let strategist = ContentStrategist::new(Arc::from(client), GenerationConfig::default());
    let mut state = PipelineState::new(KeywordSet::new("sourdough bread"));

    strategist.run(&mut state).await.unwrap();

    assert!(state.errors.is_empty());
    assert_eq!(state.confidence(CONTENT_STRATEGY_STAGE), Some(0.9));
}

#[tokio::test]
async fn test_pipeline_over_http_falls_back_on_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(2)
        .mount(&server)
        .await;

    let client = ProviderFactory::create_client(&local_provider(&server)).unwrap();
    let strategist = ContentStrategist::new(Arc::from(client), GenerationConfig::default());
    let mut state = PipelineState::new(KeywordSet::new("sourdough bread"));

    strategist.run(&mut state).await.unwrap();

    let brief = state.brief().unwrap();
    assert_eq!(brief.title, "Complete Guide to Sourdough Bread");
    assert_eq!(state.errors.len(), 1);
    assert!(state.errors[0].contains("503"));
    assert_eq!(state.confidence(CONTENT_STRATEGY_STAGE), Some(0.3));
}
