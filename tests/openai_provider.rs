mod common;

use std::time::Duration;

use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;

use code_tutor::error::CodeTutorError;
use code_tutor::interfaces::providers::{CompletionProvider, PromptRequest};
use code_tutor::providers::openai::OpenAiProvider;

use common::completion_body;

fn request() -> PromptRequest {
    PromptRequest {
        system_instruction: "You are a helpful coding tutor.".to_string(),
        user_prompt: "Give me a short lesson on: Git basics".to_string(),
        model_name: "gpt-3.5-turbo".to_string(),
        temperature: 0.5,
        max_tokens: 300,
    }
}

fn provider(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new(
        "sk-test".to_string(),
        Some(server.base_url()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn sends_bearer_auth_and_two_messages_and_trims_reply() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .body_includes(r#""model":"gpt-3.5-turbo""#)
                .body_includes(r#""max_completion_tokens":300"#)
                .body_includes("You are a helpful coding tutor.")
                .body_includes("Give me a short lesson on: Git basics");
            then.status(200)
                .json_body(completion_body("\n\n  Git tracks changes.  \n"));
        })
        .await;

    let response = provider(&server).complete(&request()).await.unwrap();
    assert_eq!(response.text, "Git tracks changes.");
    chat_mock.assert_calls(1);
}

#[tokio::test]
async fn markdown_in_the_reply_is_passed_through() {
    let server = MockServer::start_async().await;
    let reply = "## Loops\n\n```python\nfor i in range(3):\n    print(i)\n```";
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_body(reply));
        })
        .await;

    let response = provider(&server).complete(&request()).await.unwrap();
    assert_eq!(response.text, reply);
}

#[tokio::test]
async fn auth_errors_surface_the_api_message() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).json_body(json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error"
                }
            }));
        })
        .await;

    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CodeTutorError::Upstream(_)));
    let message = err.to_string();
    assert!(message.contains("401"), "{message}");
    assert!(message.contains("Incorrect API key provided"), "{message}");
    chat_mock.assert_calls(1);
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(503).body("upstream overloaded");
        })
        .await;

    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert!(err.is_upstream());
    assert!(err.to_string().contains("upstream overloaded"));
    chat_mock.assert_calls(1);
}

#[tokio::test]
async fn empty_or_undecodable_bodies_are_upstream_failures() {
    let server = MockServer::start_async().await;
    let mut mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;
    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert!(err.to_string().contains("no content"));
    mock.delete_async().await;

    let mut mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_body("  \n "));
        })
        .await;
    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CodeTutorError::Upstream(_)));
    assert!(err.to_string().contains("no content"));
    mock.delete_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).body("{\"choices\": [");
        })
        .await;
    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert!(err.to_string().contains("decode failed"));
}

#[tokio::test]
async fn slow_upstream_hits_the_request_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .delay(Duration::from_millis(800))
                .json_body(completion_body("too late"));
        })
        .await;

    let provider = OpenAiProvider::new(
        "sk-test".to_string(),
        Some(server.base_url()),
        Duration::from_millis(100),
    )
    .unwrap();
    let err = provider.complete(&request()).await.unwrap_err();
    assert!(err.is_upstream());
    assert!(err.to_string().contains("timed out"), "{err}");
}

#[tokio::test]
async fn refused_connections_are_upstream_failures() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let provider = OpenAiProvider::new(
        "sk-test".to_string(),
        Some(format!("http://127.0.0.1:{port}/v1")),
        Duration::from_secs(2),
    )
    .unwrap();
    let err = provider.complete(&request()).await.unwrap_err();
    assert!(err.is_upstream());
    assert!(err.to_string().contains("transport failed"), "{err}");
}
