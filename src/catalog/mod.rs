mod client;
mod types;

pub use client::TmdbClient;
pub use types::{
    CatalogConfig, CatalogError, Genre, SeasonSummary, ShowDetails, ShowId, ShowSummary,
    TMDB_BASE_URL,
};

use std::env;

/// Environment variable names for catalog configuration
pub const ENV_TMDB_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_TMDB_LANGUAGE: &str = "TMDB_LANGUAGE";

/// Show metadata source
pub trait Catalog {
    /// Best match for a show name, `None` when nothing matches
    fn search_show(&self, name: &str) -> Result<Option<ShowSummary>, CatalogError>;

    /// Genres, origin and season layout of a show
    fn show_details(&self, id: ShowId) -> Result<ShowDetails, CatalogError>;

    /// Title of one episode, `None` when the catalog has no such episode
    fn episode_title(
        &self,
        id: ShowId,
        season: u32,
        episode: u32,
    ) -> Result<Option<String>, CatalogError>;
}

/// Load catalog configuration from environment variables
///
/// - `TMDB_API_KEY`: TMDb v3 API key (required for lookups)
/// - `TMDB_LANGUAGE`: language for titles (default `en`)
///
/// These can be set in a `.env` file in the working directory.
pub fn config_from_env() -> CatalogConfig {
    let api_key = env::var(ENV_TMDB_API_KEY).unwrap_or_default();
    let language = env::var(ENV_TMDB_LANGUAGE)
        .ok()
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| "en".to_string());

    CatalogConfig::new(api_key.trim(), language)
}
