use serde::Deserialize;
use thiserror::Error;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Opaque catalog identifier of a show
pub type ShowId = u64;

/// Best search match for a show name
#[derive(Debug, Clone, Deserialize)]
pub struct ShowSummary {
    pub id: ShowId,
    pub name: String,
    #[serde(default)]
    pub origin_country: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: u32,
}

/// Show details relevant to episode numbering
#[derive(Debug, Clone, Deserialize)]
pub struct ShowDetails {
    pub id: ShowId,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<ShowSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EpisodeResponse {
    #[serde(default)]
    pub name: Option<String>,
}

/// Catalog client configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub api_key: String,
    pub language: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub min_request_interval_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: "en".to_string(),
            base_url: TMDB_BASE_URL.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            min_request_interval_ms: 250,
        }
    }
}

impl CatalogConfig {
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Errors that can occur when talking to the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found in catalog: {0}")]
    NotFound(String),

    #[error("Catalog rejected the API key")]
    Unauthorized,

    #[error("Rate limited by catalog")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Catalog returned error: {0}")]
    ServerError(String),

    #[error("Max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded { attempts: u32 },

    #[error("Client not configured: TMDB_API_KEY must be set")]
    NotConfigured,
}

impl CatalogError {
    /// Whether retrying the same request can succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CatalogError::RateLimited | CatalogError::NetworkError(_) | CatalogError::ServerError(_)
        )
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if err.is_decode() {
            CatalogError::ParseError(err.to_string())
        } else {
            CatalogError::NetworkError(err.to_string())
        }
    }
}
