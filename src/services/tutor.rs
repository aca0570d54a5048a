use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domains::feature::Feature;
use crate::domains::form::FormValues;
use crate::error::Result;
use crate::interfaces::providers::{CompletionProvider, PromptRequest};
use crate::prompts::{FeatureInput, MissingFields};
use crate::providers::openai::OpenAiProvider;

/// Outcome of one form submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A required field was blank; nothing was sent upstream.
    Incomplete(MissingFields),
    Answered { feature: Feature, text: String },
    Failed { feature: Feature, message: String },
}

impl Submission {
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered { .. })
    }
}

/// Turns feature forms into completion calls.
pub struct TutorService {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl TutorService {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = OpenAiProvider::from_config(config)?;
        Ok(Self::new(Arc::new(provider), config.model()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn request_for(&self, input: &FeatureInput) -> PromptRequest {
        let prompt = input.prompt();
        let sampling = input.sampling();
        PromptRequest {
            system_instruction: prompt.system_instruction,
            user_prompt: prompt.user_prompt,
            model_name: self.model.clone(),
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        }
    }

    /// Validates the form and, when complete, makes exactly one completion call.
    pub async fn submit(&self, feature: Feature, values: &FormValues) -> Submission {
        let input = match FeatureInput::parse(feature, values) {
            Ok(input) => input,
            Err(missing) => {
                debug!(feature = feature.slug(), missing = ?missing.0, "Submit rejected");
                return Submission::Incomplete(missing);
            }
        };

        let request = self.request_for(&input);
        match self.provider.complete(&request).await {
            Ok(response) => {
                info!(feature = feature.slug(), "Submit answered");
                Submission::Answered {
                    feature,
                    text: response.text,
                }
            }
            Err(err) => {
                warn!(feature = feature.slug(), "Submit failed: {err}");
                Submission::Failed {
                    feature,
                    message: err.to_string(),
                }
            }
        }
    }
}
