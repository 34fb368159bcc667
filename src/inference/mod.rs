mod client;
mod prompts;
mod types;

pub use client::OllamaClient;
pub use prompts::{continuous_mapping_prompt, episode_extraction_prompt, NO_EPISODE_REPLY, UNKNOWN_REPLY};
pub use types::{InferenceConfig, InferenceError, DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_MODEL};

use crate::episode::EpisodeGuess;
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use tracing::{info, warn};

/// Environment variable names for the inference service
pub const ENV_OLLAMA_HOST: &str = "OLLAMA_HOST";
pub const ENV_OLLAMA_MODEL: &str = "OLLAMA_MODEL";

/// Accepted season range for extracted episode markers
pub const SEASON_RANGE: std::ops::RangeInclusive<u32> = 1..=20;
/// Accepted episode range for extracted episode markers
pub const EPISODE_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

static EPISODE_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)S(\d{1,2})\s*EP?(\d{1,3})").unwrap());

/// A fallible, non-deterministic text oracle
pub trait Oracle {
    /// Send a prompt and return the trimmed reply text
    fn ask(&self, prompt: &str) -> Result<String, InferenceError>;
}

/// Load inference configuration from environment variables
///
/// - `OLLAMA_HOST`: server base URL (default `http://localhost:11434`)
/// - `OLLAMA_MODEL`: model name (default `gpt-oss:20b`)
pub fn config_from_env() -> InferenceConfig {
    let host = env::var(ENV_OLLAMA_HOST)
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string());
    let model = env::var(ENV_OLLAMA_MODEL)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());

    InferenceConfig::new(host, model)
}

/// Parse an extraction reply into a season/episode pair within sane bounds
pub fn parse_episode_response(response: &str) -> Option<EpisodeGuess> {
    if response.trim() == NO_EPISODE_REPLY {
        return None;
    }

    let captures = EPISODE_MARKER_REGEX.captures(response)?;
    let season: u32 = captures.get(1)?.as_str().parse().ok()?;
    let episode: u32 = captures.get(2)?.as_str().parse().ok()?;

    if SEASON_RANGE.contains(&season) && EPISODE_RANGE.contains(&episode) {
        Some(EpisodeGuess::new(season, episode))
    } else {
        warn!(
            "Inference returned out of range numbers S{:02}E{:02}",
            season, episode
        );
        None
    }
}

/// Ask the oracle for the season/episode of a filename.
///
/// Any failure (timeout, unusable reply, out-of-range numbers) yields `None`.
pub fn extract_episode(oracle: &dyn Oracle, filename: &str) -> Option<EpisodeGuess> {
    let response = match oracle.ask(&episode_extraction_prompt(filename)) {
        Ok(r) => r,
        Err(e) => {
            warn!("Episode extraction failed for '{}': {}", filename, e);
            return None;
        }
    };

    match parse_episode_response(&response) {
        Some(guess) => {
            info!("Extracted {} from '{}'", guess.code(), filename);
            Some(guess)
        }
        None => {
            warn!(
                "Could not read an episode from reply '{}' for '{}'",
                response.chars().take(100).collect::<String>(),
                filename
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // Mutex to serialize env var tests (they share global state)
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    struct ScriptedOracle {
        replies: RefCell<VecDeque<Result<String, InferenceError>>>,
    }

    impl ScriptedOracle {
        fn new(replies: Vec<Result<String, InferenceError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
            }
        }
    }

    impl Oracle for ScriptedOracle {
        fn ask(&self, _prompt: &str) -> Result<String, InferenceError> {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(InferenceError::Timeout))
        }
    }

    #[test]
    fn test_parse_standard_marker() {
        assert_eq!(parse_episode_response("S02E05"), Some(EpisodeGuess::new(2, 5)));
        assert_eq!(parse_episode_response("s1e9"), Some(EpisodeGuess::new(1, 9)));
    }

    #[test]
    fn test_parse_ep_marker() {
        assert_eq!(parse_episode_response("S01EP04"), Some(EpisodeGuess::new(1, 4)));
        assert_eq!(parse_episode_response("S01EP115"), None);
    }

    #[test]
    fn test_parse_marker_inside_chatter() {
        assert_eq!(
            parse_episode_response("The answer is S03E12."),
            Some(EpisodeGuess::new(3, 12))
        );
    }

    #[test]
    fn test_parse_none_reply() {
        assert_eq!(parse_episode_response("NONE"), None);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(parse_episode_response("S21E01"), None);
        assert_eq!(parse_episode_response("S00E01"), None);
        assert_eq!(parse_episode_response("S01E00"), None);
        assert_eq!(parse_episode_response("S01E51"), None);
    }

    #[test]
    fn test_parse_range_edges_accepted() {
        assert_eq!(parse_episode_response("S20E50"), Some(EpisodeGuess::new(20, 50)));
        assert_eq!(parse_episode_response("S01E01"), Some(EpisodeGuess::new(1, 1)));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_episode_response("episode five"), None);
    }

    #[test]
    fn test_extract_episode_success() {
        let oracle = ScriptedOracle::new(vec![Ok("S02E05".to_string())]);
        assert_eq!(
            extract_episode(&oracle, "Example.Show.S02E05.1080p.mkv"),
            Some(EpisodeGuess::new(2, 5))
        );
    }

    #[test]
    fn test_extract_episode_failure_is_none() {
        let oracle = ScriptedOracle::new(vec![Err(InferenceError::Timeout)]);
        assert_eq!(extract_episode(&oracle, "whatever.mkv"), None);
    }

    #[test]
    fn test_config_from_env_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::remove_var(ENV_OLLAMA_HOST);
        env::remove_var(ENV_OLLAMA_MODEL);

        let config = config_from_env();

        assert_eq!(config.host, DEFAULT_OLLAMA_HOST);
        assert_eq!(config.model, DEFAULT_OLLAMA_MODEL);
    }

    #[test]
    fn test_config_from_env_with_values() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::set_var(ENV_OLLAMA_HOST, "http://gpu:11434/");
        env::set_var(ENV_OLLAMA_MODEL, "qwen2.5:7b");

        let config = config_from_env();

        assert_eq!(config.host, "http://gpu:11434");
        assert_eq!(config.model, "qwen2.5:7b");

        env::remove_var(ENV_OLLAMA_HOST);
        env::remove_var(ENV_OLLAMA_MODEL);
    }
}
