use super::types::{InferenceConfig, InferenceError};
use super::Oracle;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Blocking client for a local Ollama server
pub struct OllamaClient {
    client: Client,
    config: InferenceConfig,
}

impl OllamaClient {
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Whether the configured model is installed on the server
    pub fn check_model(&self) -> Result<bool, InferenceError> {
        let url = format!("{}/api/tags", self.config.host);
        debug!("Requesting: {}", url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(InferenceError::ServerError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response.json()?;
        Ok(model_listed(&tags, &self.config.model))
    }
}

fn model_listed(tags: &TagsResponse, model: &str) -> bool {
    tags.models
        .iter()
        .any(|m| m.name == model || m.name.strip_suffix(":latest") == Some(model))
}

impl Oracle for OllamaClient {
    fn ask(&self, prompt: &str) -> Result<String, InferenceError> {
        let url = format!("{}/api/generate", self.config.host);
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send()?;
        let status = response.status();
        debug!("Inference response status: {}", status);

        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(InferenceError::ServerError(format!("HTTP {}: {}", status, text)));
        }

        let generated: GenerateResponse = response.json()?;
        trace!(response = %generated.response, "Inference output");

        Ok(generated.response.trim().to_string())
    }
}
