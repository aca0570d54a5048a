#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::json;

use code_tutor::error::{CodeTutorError, Result};
use code_tutor::interfaces::providers::{CompletionProvider, PromptRequest, PromptResponse};
use code_tutor::server::{build_router, AppState};
use code_tutor::services::tutor::TutorService;

/// Fake completion client: records every request and replays queued replies.
/// An empty queue answers with a fixed text.
#[derive(Default)]
pub struct RecordingProvider {
    requests: Mutex<Vec<PromptRequest>>,
    replies: Mutex<VecDeque<Result<String>>>,
}

impl RecordingProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_reply(&self, text: &str) {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_failure(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(CodeTutorError::Upstream(message.to_string())));
    }

    pub fn requests(&self) -> Vec<PromptRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn complete(&self, request: &PromptRequest) -> Result<PromptResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("default tutor reply".to_string()));
        reply.map(|text| PromptResponse {
            text: text.trim().to_string(),
        })
    }
}

pub fn app_with(provider: Arc<RecordingProvider>) -> axum::Router {
    let tutor = TutorService::new(provider, "gpt-test");
    build_router(AppState {
        tutor: Arc::new(tutor),
    })
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// An OpenAI-style chat completion response body.
pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}
