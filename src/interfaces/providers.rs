use async_trait::async_trait;
use crate::error::Result;

/// One completion call: built per submit, dropped once answered.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResponse {
    pub text: String,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends one request and returns the first completion, trimmed. Every
    /// failure surfaces as [`crate::error::CodeTutorError::Upstream`].
    async fn complete(&self, request: &PromptRequest) -> Result<PromptResponse>;
}
