//! CLI route handlers driven end to end

use crate::integration::test_utils::{research_state_json, valid_brief_json};
use clap::Parser;
use seo_outline::cli::{Cli, CliError, Commands, RunContext};
use seo_outline::state::{PipelineState, CONTENT_STRATEGY_STAGE};
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_state(dir: &TempDir) -> PathBuf {
    let input = dir.path().join("state.json");
    std::fs::write(&input, research_state_json().to_string()).unwrap();
    input
}

fn write_local_config(dir: &Path, endpoint: &str) -> PathBuf {
    let config_path = dir.join("outline.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[provider]
provider_type = "local"
model = "local-model"
endpoint = "{}"

[generation]
request_timeout_secs = 10
"#,
            endpoint
        ),
    )
    .unwrap();
    config_path
}

#[test]
fn test_context_command_from_parsed_args() {
    let dir = TempDir::new().unwrap();
    let input = write_state(&dir);
    let config_path = write_local_config(dir.path(), "http://localhost:9");

    let cli = Cli::try_parse_from([
        "seo-outline",
        "--config",
        config_path.to_str().unwrap(),
        "context",
        "--input",
        input.to_str().unwrap(),
    ])
    .unwrap();
    let ctx = RunContext::new(cli.workspace.clone(), cli.config.clone()).unwrap();
    let output = ctx.execute(&cli.command).unwrap();

    assert!(output.starts_with("PRIMARY KEYWORD: sourdough bread\n"));
    assert!(output.ends_with("CONTENT GAPS TO ADDRESS: High altitude baking"));
}

#[test]
fn test_generate_writes_updated_state() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "local-model",
                "choices": [{
                    "message": { "content": valid_brief_json().to_string() },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;
        server
    });

    let dir = TempDir::new().unwrap();
    let input = write_state(&dir);
    let output = dir.path().join("out.json");
    let config_path = write_local_config(dir.path(), &format!("{}/v1", server.uri()));

    let ctx = RunContext::new(dir.path().to_path_buf(), Some(config_path)).unwrap();
    let printed = ctx
        .execute(&Commands::Generate {
            input,
            output: Some(output.clone()),
        })
        .unwrap();
    assert!(printed.is_empty());

    let state: PipelineState =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(state.confidence(CONTENT_STRATEGY_STAGE), Some(0.9));
    assert_eq!(state.brief().unwrap().sections.len(), 2);
    drop(server);
}

#[test]
fn test_generate_rejects_missing_primary_keyword() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("state.json");
    std::fs::write(&input, r#"{"keywords": {"secondary": ["x"]}}"#).unwrap();
    let config_path = write_local_config(dir.path(), "http://localhost:9");

    let ctx = RunContext::new(dir.path().to_path_buf(), Some(config_path)).unwrap();
    let err = ctx
        .execute(&Commands::Generate {
            input,
            output: None,
        })
        .unwrap_err();
    assert!(matches!(err, CliError::Strategy(_)));
    assert!(seo_outline::cli::map_error(&err).starts_with("Invalid pipeline state"));
}
