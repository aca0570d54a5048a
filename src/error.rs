use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeTutorError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("upstream failure: {0}")]
    Upstream(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl CodeTutorError {
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

pub use crate::Result;
