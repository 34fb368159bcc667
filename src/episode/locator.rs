use super::continuous::map_to_continuous;
use super::types::{
    EpisodeGuess, ResolutionSource, ResolvedEpisode, FALLBACK_EPISODES_PER_SEASON,
};
use crate::catalog::Catalog;
use crate::inference::Oracle;
use crate::season::ShowCatalogEntry;
use tracing::{debug, info, warn};

/// Continuous index from the fixed 12-episodes-per-season heuristic
pub fn fallback_episode(guess: EpisodeGuess) -> u32 {
    if guess.season > 1 {
        guess.episode + (guess.season - 1) * FALLBACK_EPISODES_PER_SEASON
    } else {
        guess.episode
    }
}

/// Final numbering plus the episode title found for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitledEpisode {
    pub resolved: ResolvedEpisode,
    pub title: Option<String>,
}

/// Decides the final season/episode numbers for detected episodes
pub struct EpisodeLocator<'a> {
    oracle: &'a dyn Oracle,
}

impl<'a> EpisodeLocator<'a> {
    pub fn new(oracle: &'a dyn Oracle) -> Self {
        Self { oracle }
    }

    pub fn resolve(&self, entry: &ShowCatalogEntry, guess: EpisodeGuess) -> ResolvedEpisode {
        if !entry.is_continuous_candidate {
            return ResolvedEpisode::identity(guess);
        }

        match map_to_continuous(self.oracle, entry, guess) {
            Some(episode) => {
                let resolved = ResolvedEpisode::continuous(episode, ResolutionSource::Authoritative);
                info!("Inferred anime mapping: {} -> {}", guess.code(), resolved);
                resolved
            }
            None => {
                let resolved = ResolvedEpisode::continuous(
                    fallback_episode(guess),
                    ResolutionSource::FallbackArithmetic,
                );
                info!("Fallback anime mapping: {} -> {}", guess.code(), resolved);
                resolved
            }
        }
    }

    /// Look up the title for a resolved episode.
    ///
    /// When a continuous numbering has no title in the catalog, the file falls
    /// back to its detected numbering, with that numbering's title if any.
    pub fn resolve_title(
        &self,
        catalog: &dyn Catalog,
        entry: &ShowCatalogEntry,
        guess: EpisodeGuess,
        resolved: ResolvedEpisode,
    ) -> TitledEpisode {
        let title = fetch_title(catalog, entry, resolved.season, resolved.episode);

        if title.is_some() || !resolved.is_continuous() || resolved.matches(guess) {
            return TitledEpisode { resolved, title };
        }

        info!(
            "No title for {}, trying detected {}",
            resolved,
            guess.code()
        );

        match fetch_title(catalog, entry, guess.season, guess.episode) {
            Some(title) => {
                info!("Using detected numbering {} for output", guess.code());
                TitledEpisode {
                    resolved: ResolvedEpisode::identity(guess),
                    title: Some(title),
                }
            }
            None => {
                info!(
                    "No title found, using detected {} for filename",
                    guess.code()
                );
                TitledEpisode {
                    resolved: ResolvedEpisode::identity(guess),
                    title: None,
                }
            }
        }
    }
}

fn fetch_title(
    catalog: &dyn Catalog,
    entry: &ShowCatalogEntry,
    season: u32,
    episode: u32,
) -> Option<String> {
    match catalog.episode_title(entry.id, season, episode) {
        Ok(Some(title)) => {
            debug!("Title for S{:02}E{:02}: {}", season, episode, title);
            Some(title)
        }
        Ok(None) => {
            debug!("No title for S{:02}E{:02}", season, episode);
            None
        }
        Err(e) => {
            warn!(
                "Error fetching episode details for S{:02}E{:02}: {}",
                season, episode, e
            );
            None
        }
    }
}
