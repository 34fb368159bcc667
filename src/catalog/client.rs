use super::types::{
    CatalogConfig, CatalogError, EpisodeResponse, SearchResponse, ShowDetails, ShowId, ShowSummary,
};
use super::Catalog;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Spaces out requests so the catalog's rate limit is never hit
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    fn wait_if_needed(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:?}", wait_time);
                std::thread::sleep(wait_time);
            }
        }

        *last = Some(Instant::now());
    }
}

/// TMDb v3 HTTP client
pub struct TmdbClient {
    client: Client,
    config: CatalogConfig,
    rate_limiter: RateLimiter,
}

impl TmdbClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        if !config.is_configured() {
            return Err(CatalogError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .user_agent(concat!("tvrename/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        let rate_limiter = RateLimiter::new(Duration::from_millis(config.min_request_interval_ms));

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET a JSON resource, retrying transient failures with backoff
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let mut last_error = None;
        let mut delay = Duration::from_secs(1);

        for attempt in 1..=self.config.max_retries {
            debug!(
                "GET {} (attempt {}/{})",
                path, attempt, self.config.max_retries
            );

            self.rate_limiter.wait_if_needed();

            match self.get_json_once(path, query) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if !e.is_transient() {
                        return Err(e);
                    }

                    warn!("Attempt {} for {} failed: {}", attempt, path, e);
                    last_error = Some(e);

                    if attempt < self.config.max_retries {
                        debug!("Waiting {:?} before retry", delay);
                        std::thread::sleep(delay);
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error.unwrap_or(CatalogError::MaxRetriesExceeded {
            attempts: self.config.max_retries,
        }))
    }

    fn get_json_once<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(self.url(path))
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .query(query)
            .send()?;

        let status = response.status();
        debug!("Response status: {}", status);

        match status {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(CatalogError::NotFound(path.to_string())),
            StatusCode::UNAUTHORIZED => return Err(CatalogError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(CatalogError::RateLimited),
            s => {
                let body = response.text().unwrap_or_default();
                return Err(CatalogError::ServerError(format!("HTTP {}: {}", s, body)));
            }
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| CatalogError::ParseError(e.to_string()))
    }
}

impl Catalog for TmdbClient {
    fn search_show(&self, name: &str) -> Result<Option<ShowSummary>, CatalogError> {
        info!("Searching catalog for '{}'", name);
        let response: SearchResponse = self.get_json("/search/tv", &[("query", name)])?;
        Ok(response.results.into_iter().next())
    }

    fn show_details(&self, id: ShowId) -> Result<ShowDetails, CatalogError> {
        self.get_json(&format!("/tv/{}", id), &[])
    }

    fn episode_title(
        &self,
        id: ShowId,
        season: u32,
        episode: u32,
    ) -> Result<Option<String>, CatalogError> {
        let path = format!("/tv/{}/season/{}/episode/{}", id, season, episode);

        match self.get_json::<EpisodeResponse>(&path, &[]) {
            Ok(response) => Ok(response.name.filter(|n| !n.trim().is_empty())),
            Err(CatalogError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CatalogConfig {
        CatalogConfig::new("testkey", "en")
    }

    #[test]
    fn test_client_requires_config() {
        let result = TmdbClient::new(CatalogConfig::default());
        assert!(matches!(result, Err(CatalogError::NotConfigured)));
    }

    #[test]
    fn test_client_creation() {
        let client = TmdbClient::new(test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_building() {
        let mut config = test_config();
        config.base_url = "http://localhost:8080/3/".to_string();
        let client = TmdbClient::new(config).unwrap();

        assert_eq!(client.url("/tv/42"), "http://localhost:8080/3/tv/42");
    }

    #[test]
    fn test_unreachable_catalog_reports_error() {
        let mut config = test_config();
        config.base_url = "http://127.0.0.1:9".to_string();
        config.max_retries = 1;
        config.timeout_secs = 2;
        let client = TmdbClient::new(config).unwrap();

        assert!(client.search_show("Example Show").is_err());
    }

    #[test]
    fn test_rate_limiter() {
        let limiter = RateLimiter::new(Duration::from_millis(100));

        let start = Instant::now();
        limiter.wait_if_needed();
        limiter.wait_if_needed();
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(100));
    }
}
