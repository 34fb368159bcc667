mod continuous;
mod locator;
mod types;

pub use continuous::{map_to_continuous, parse_continuous_response};
pub use locator::{fallback_episode, EpisodeLocator, TitledEpisode};
pub use types::{
    EpisodeGuess, ResolutionSource, ResolvedEpisode, FALLBACK_EPISODES_PER_SEASON,
    MAX_CONTINUOUS_EPISODE,
};
