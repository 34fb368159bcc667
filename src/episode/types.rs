use std::fmt;

/// Episodes per season assumed when no continuous mapping is available
pub const FALLBACK_EPISODES_PER_SEASON: u32 = 12;

/// Largest continuous episode index accepted from the inference service
pub const MAX_CONTINUOUS_EPISODE: u32 = 200;

/// Season/episode pair read from a filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeGuess {
    pub season: u32,
    pub episode: u32,
}

impl EpisodeGuess {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }

    /// `S02E05` style code, as recorded in the run log
    pub fn code(&self) -> String {
        episode_code(self.season, self.episode)
    }
}

/// How the final numbering was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Continuous index returned by the inference service
    Authoritative,
    /// Fixed 12-episodes-per-season arithmetic
    FallbackArithmetic,
    /// Detected numbers used verbatim
    Identity,
}

impl ResolutionSource {
    pub fn description(&self) -> &'static str {
        match self {
            ResolutionSource::Authoritative => "continuous (inferred)",
            ResolutionSource::FallbackArithmetic => "continuous (fallback)",
            ResolutionSource::Identity => "as detected",
        }
    }
}

/// Final numbering chosen for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEpisode {
    pub season: u32,
    pub episode: u32,
    pub used_fallback: bool,
    pub source: ResolutionSource,
}

impl ResolvedEpisode {
    /// Use the detected numbers unchanged
    pub fn identity(guess: EpisodeGuess) -> Self {
        Self {
            season: guess.season,
            episode: guess.episode,
            used_fallback: false,
            source: ResolutionSource::Identity,
        }
    }

    /// Season 1 with a continuous episode index
    pub fn continuous(episode: u32, source: ResolutionSource) -> Self {
        Self {
            season: 1,
            episode,
            used_fallback: source == ResolutionSource::FallbackArithmetic,
            source,
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.source != ResolutionSource::Identity
    }

    pub fn matches(&self, guess: EpisodeGuess) -> bool {
        self.season == guess.season && self.episode == guess.episode
    }

    pub fn code(&self) -> String {
        episode_code(self.season, self.episode)
    }
}

impl fmt::Display for ResolvedEpisode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}EP{:03}", self.season, self.episode)
    }
}

fn episode_code(season: u32, episode: u32) -> String {
    format!("S{:02}E{:02}", season, episode)
}
