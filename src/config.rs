use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{CodeTutorError, Result};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "CODE_TUTOR_MODEL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub openai: Option<OpenAiConfig>,
    pub server: Option<ServerConfig>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl Config {
    pub fn convention_defaults() -> Self {
        Self {
            openai: Some(OpenAiConfig {
                api_key: None,
                model: Some(DEFAULT_MODEL.to_string()),
                base_url: Some(DEFAULT_BASE_URL.to_string()),
                timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
            }),
            server: Some(ServerConfig {
                host: Some(DEFAULT_HOST.to_string()),
                port: Some(DEFAULT_PORT),
            }),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            CodeTutorError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| CodeTutorError::Config(format!("invalid {}: {e}", path.display())))
    }

    /// Loads the optional config file, then layers the process environment on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::convention_defaults(),
        };
        Ok(config.apply_env(|key| std::env::var(key).ok()))
    }

    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai = self.openai.get_or_insert_with(OpenAiConfig::default);
        let env = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(key) = env(API_KEY_ENV) {
            openai.api_key = Some(key);
        }
        if let Some(url) = env(BASE_URL_ENV) {
            openai.base_url = Some(url);
        }
        if let Some(model) = env(MODEL_ENV) {
            openai.model = Some(model);
        }
        self
    }

    pub fn with_server_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        let server = self.server.get_or_insert_with(ServerConfig::default);
        if host.is_some() {
            server.host = host;
        }
        if port.is_some() {
            server.port = port;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key().is_none() {
            return Err(CodeTutorError::Config(format!(
                "no API credential configured; set {API_KEY_ENV} or openai.api_key"
            )));
        }
        if self.timeout().is_zero() {
            return Err(CodeTutorError::Config(
                "openai.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.openai.as_ref().and_then(|o| o.api_key.as_ref()))
    }

    pub fn model(&self) -> &str {
        non_blank(self.openai.as_ref().and_then(|o| o.model.as_ref())).unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        non_blank(self.openai.as_ref().and_then(|o| o.base_url.as_ref()))
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        let seconds = self
            .openai
            .as_ref()
            .and_then(|o| o.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }

    pub fn host(&self) -> &str {
        non_blank(self.server.as_ref().and_then(|s| s.host.as_ref())).unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }
}
