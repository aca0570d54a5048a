use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};

use crate::config::Config;
use crate::error::{CodeTutorError, Result};
use crate::interfaces::providers::{CompletionProvider, PromptRequest, PromptResponse};

/// Client for an OpenAI-compatible `/chat/completions` endpoint. One attempt
/// per call; the request timeout is the only bound on how long a call waits.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.unwrap_or_else(|| crate::config::DEFAULT_BASE_URL.to_string());
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodeTutorError::Runtime(format!("cannot build http client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            CodeTutorError::Config("no API credential configured".to_string())
        })?;
        Self::new(
            api_key.to_string(),
            Some(config.base_url().to_string()),
            config.timeout(),
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_system_message(instruction: &str) -> Result<Option<ChatCompletionRequestMessage>> {
        if instruction.trim().is_empty() {
            return Ok(None);
        }
        let message = ChatCompletionRequestSystemMessageArgs::default()
            .content(instruction)
            .build()
            .map_err(|e| CodeTutorError::Serialization(e.to_string()))?;
        Ok(Some(ChatCompletionRequestMessage::System(message)))
    }

    fn build_user_text_message(prompt: &str) -> Result<ChatCompletionRequestMessage> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Text(
                prompt.to_string(),
            ))
            .build()
            .map_err(|e| CodeTutorError::Serialization(e.to_string()))?;
        Ok(ChatCompletionRequestMessage::User(message))
    }

    pub fn build_request(request: &PromptRequest) -> Result<CreateChatCompletionRequest> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = Self::build_system_message(&request.system_instruction)? {
            messages.push(system);
        }
        messages.push(Self::build_user_text_message(&request.user_prompt)?);

        CreateChatCompletionRequestArgs::default()
            .model(request.model_name.clone())
            .messages(messages)
            .temperature(request.temperature)
            .max_completion_tokens(request.max_tokens)
            .build()
            .map_err(|e| CodeTutorError::Serialization(e.to_string()))
    }

    async fn post_chat_completion(&self, request: &CreateChatCompletionRequest) -> Result<Value> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CodeTutorError::Upstream(format!("chat completion timed out: {e}"))
                } else {
                    CodeTutorError::Upstream(format!("chat completion transport failed: {e}"))
                }
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CodeTutorError::Upstream(format!("chat completion read failed: {e}")))?;

        if status != StatusCode::OK {
            return Err(CodeTutorError::Upstream(format!(
                "chat completion failed ({status}): {}",
                Self::describe_error_body(&body)
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| CodeTutorError::Upstream(format!("chat completion decode failed: {e}")))
    }

    /// Prefers the `error.message` of an OpenAI-style error body.
    fn describe_error_body(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(|message| message.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string())
    }

    fn extract_text_from_value(response: &Value) -> Option<String> {
        response
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &PromptRequest) -> Result<PromptResponse> {
        let body = Self::build_request(request)
            .map_err(|e| CodeTutorError::Upstream(format!("cannot build request: {e}")))?;
        debug!(
            model = %request.model_name,
            prompt_chars = request.user_prompt.chars().count(),
            max_tokens = request.max_tokens,
            "Sending chat completion"
        );

        let started = Instant::now();
        let result = self.post_chat_completion(&body).await.and_then(|value| {
            Self::extract_text_from_value(&value)
                .map(|text| PromptResponse { text })
                .ok_or_else(|| {
                    CodeTutorError::Upstream("chat completion returned no content".to_string())
                })
        });
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => info!(
                model = %request.model_name,
                elapsed_ms,
                reply_chars = response.text.chars().count(),
                "Chat completion finished"
            ),
            Err(err) => warn!(model = %request.model_name, elapsed_ms, "{err}"),
        }
        result
    }
}
