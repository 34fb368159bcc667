use thiserror::Error;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "gpt-oss:20b";

/// Inference service configuration
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub host: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl InferenceConfig {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            model: model.into(),
            ..Default::default()
        }
    }
}

/// Errors that can occur when querying the inference service
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference request timed out")]
    Timeout,

    #[error("Inference service unreachable: {0}")]
    NetworkError(String),

    #[error("Inference service returned error: {0}")]
    ServerError(String),

    #[error("Failed to parse inference response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InferenceError::Timeout
        } else if err.is_decode() {
            InferenceError::ParseError(err.to_string())
        } else {
            InferenceError::NetworkError(err.to_string())
        }
    }
}
