//! Provider HTTP tests against a mocked API server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use casegen::ai::anthropic::AnthropicProvider;
use casegen::ai::openai::OpenAiProvider;
use casegen::ai::{AiMessage, AiProvider, GenerateOptions};
use casegen::errors::CasegenError;

fn messages() -> Vec<AiMessage> {
    vec![
        AiMessage::system("You are a QA expert"),
        AiMessage::user("Generate test cases"),
    ]
}

#[tokio::test]
async fn openai_request_shape_and_response_parsing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "You are a QA expert"},
                {"role": "user", "content": "Generate test cases"}
            ],
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "[]"}, "finish_reason": "stop"}],
            "model": "gpt-4o-2024-08-06",
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("sk-test")
        .with_base_url(format!("{}/v1/chat/completions", server.uri()));

    let options = GenerateOptions::for_case_generation();
    let response = provider
        .generate_text("gpt-4o", &messages(), &options)
        .await
        .unwrap();

    assert_eq!(response.text, "[]");
    assert_eq!(response.provider, "openai");
    assert_eq!(response.usage.total_tokens, 15);
}

#[tokio::test]
async fn openai_api_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("sk-bad").with_base_url(server.uri());

    let err = provider
        .generate_text("gpt-4o", &messages(), &GenerateOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CasegenError::Provider(_)));
    assert!(err.to_string().contains("Incorrect API key"));
}

#[tokio::test]
async fn anthropic_request_shape_and_response_parsing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-sonnet-4-20250514",
            "system": "You are a QA expert",
            "messages": [{"role": "user", "content": "Generate test cases"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "[]"}],
            "model": "claude-sonnet-4-20250514",
            "usage": {"input_tokens": 20, "output_tokens": 4}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new("sk-ant-test")
        .with_base_url(format!("{}/v1/messages", server.uri()));

    let options = GenerateOptions::for_case_generation();
    let response = provider
        .generate_text("claude-sonnet-4-20250514", &messages(), &options)
        .await
        .unwrap();

    assert_eq!(response.text, "[]");
    assert_eq!(response.provider, "anthropic");
    assert_eq!(response.usage.total_tokens, 24);
}

#[tokio::test]
async fn anthropic_api_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new("sk-ant-bad").with_base_url(server.uri());

    let err = provider
        .generate_text("claude-sonnet-4-20250514", &messages(), &GenerateOptions::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("authentication_error"));
}

#[tokio::test]
async fn unconfigured_provider_fails_before_any_request() {
    let server = MockServer::start().await;
    // No mock mounted: any request would 404 and the expect(0) below would
    // not be needed, but an unconfigured provider must not reach the wire.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    std::env::remove_var("OPENAI_API_KEY");
    let provider = OpenAiProvider::from_env().with_base_url(server.uri());

    let err = provider
        .generate_text("gpt-4o", &messages(), &GenerateOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CasegenError::ProviderNotConfigured { .. }));
}
