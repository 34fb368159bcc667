use crate::catalog::{CatalogError, ShowDetails, ShowId, ShowSummary};
use std::collections::BTreeMap;
use thiserror::Error;

/// Genre that marks a show as animated
const ANIMATION_GENRE: &str = "animation";
/// Origin country code for Japanese productions
const JAPAN_COUNTRY_CODE: &str = "JP";

/// Per-show season layout as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCatalogEntry {
    pub id: ShowId,
    pub name: String,
    /// Season number to episode count, specials excluded
    pub seasons: BTreeMap<u32, u32>,
    pub total_episodes: u32,
    /// Whether episodes should be renumbered continuously (anime-style cours)
    pub is_continuous_candidate: bool,
    /// False when only the search succeeded and the season layout is unknown
    pub details_available: bool,
}

impl ShowCatalogEntry {
    pub fn new(
        id: ShowId,
        name: impl Into<String>,
        seasons: BTreeMap<u32, u32>,
        is_continuous_candidate: bool,
    ) -> Self {
        let seasons: BTreeMap<u32, u32> = seasons.into_iter().filter(|(s, _)| *s > 0).collect();
        let total_episodes = seasons.values().sum();

        Self {
            id,
            name: name.into(),
            seasons,
            total_episodes,
            is_continuous_candidate,
            details_available: true,
        }
    }

    /// Entry for a show whose details could not be fetched
    pub fn without_details(summary: &ShowSummary) -> Self {
        Self {
            details_available: false,
            ..Self::new(summary.id, summary.name.clone(), BTreeMap::new(), false)
        }
    }

    pub fn from_details(details: &ShowDetails) -> Self {
        let seasons = details
            .seasons
            .iter()
            .filter(|s| s.season_number > 0)
            .map(|s| (s.season_number, s.episode_count))
            .collect();

        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        let continuous = is_continuous_candidate(&genres, &details.origin_country, &details.name);

        Self::new(details.id, details.name.clone(), seasons, continuous)
    }
}

/// Animated and Japanese (by origin country or by name) shows get continuous numbering
pub fn is_continuous_candidate(genres: &[&str], origin_country: &[String], name: &str) -> bool {
    let animated = genres
        .iter()
        .any(|g| g.eq_ignore_ascii_case(ANIMATION_GENRE));
    let japanese = origin_country
        .iter()
        .any(|c| c.eq_ignore_ascii_case(JAPAN_COUNTRY_CODE))
        || name.to_lowercase().contains("japan");

    animated && japanese
}

/// Errors that can occur when resolving a show's season layout
#[derive(Error, Debug)]
pub enum SeasonError {
    #[error("Show not found in catalog: {0}")]
    ShowNotFound(String),

    #[error("Catalog search failed for '{name}': {source}")]
    Catalog {
        name: String,
        #[source]
        source: CatalogError,
    },
}
