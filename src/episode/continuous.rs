use super::types::{EpisodeGuess, MAX_CONTINUOUS_EPISODE};
use crate::inference::{continuous_mapping_prompt, Oracle, UNKNOWN_REPLY};
use crate::season::ShowCatalogEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());

/// Read a continuous episode index out of an inference reply.
///
/// The last standalone integer wins, since models tend to show their working
/// before the answer. Values outside `1..=200` are discarded.
pub fn parse_continuous_response(response: &str) -> Option<u32> {
    let trimmed = response.trim();
    if trimmed == UNKNOWN_REPLY {
        return None;
    }

    let last = INTEGER_REGEX.find_iter(trimmed).last()?;
    let value: u32 = match last.as_str().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!("Inference returned an unusable number: {}", last.as_str());
            return None;
        }
    };

    if (1..=MAX_CONTINUOUS_EPISODE).contains(&value) {
        Some(value)
    } else {
        warn!("Inference returned unreasonable episode number: {}", value);
        None
    }
}

/// Ask the oracle where a season/episode pair lands in continuous numbering
pub fn map_to_continuous(
    oracle: &dyn Oracle,
    entry: &ShowCatalogEntry,
    guess: EpisodeGuess,
) -> Option<u32> {
    let prompt = continuous_mapping_prompt(entry, guess);

    let response = match oracle.ask(&prompt) {
        Ok(r) => r,
        Err(e) => {
            warn!("Continuous mapping failed for {}: {}", guess.code(), e);
            return None;
        }
    };

    let mapped = parse_continuous_response(&response);
    match mapped {
        Some(episode) => info!("Inference suggested continuous episode: {}", episode),
        None => warn!(
            "No usable continuous mapping in reply: {}",
            response.chars().take(100).collect::<String>()
        ),
    }
    mapped
}
