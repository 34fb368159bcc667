use crate::episode::EpisodeGuess;
use crate::season::ShowCatalogEntry;

/// Reply the model is told to give when a filename has no episode marker
pub const NO_EPISODE_REPLY: &str = "NONE";

/// Reply the model is told to give when it cannot map an episode
pub const UNKNOWN_REPLY: &str = "UNKNOWN";

/// Prompt asking for the season/episode marker of a filename
pub fn episode_extraction_prompt(filename: &str) -> String {
    format!(
        "You are an expert at extracting season and episode numbers from video filenames.

FILENAME: {filename}

Extract the season and episode numbers. Look for these patterns:
- S01E05, S1E5, S2E10 (season/episode format)
- 1x05, 2x10 (season x episode format)
- E05, EP05, Episode05 (episode only - assume season 1)
- 05, 005 (just numbers - assume season 1)
- season1episode5, s1e5 (written out)

RULES:
1. Read numbers carefully: S01E04 = season 1 episode 4, NOT season 4 episode 4
2. If the filename shows S2E15, S3E08, etc. extract the EXACT season and episode shown
3. If only an episode number is found (no season), assume season 1
4. Ignore extra numbers like years (2024), resolution (1080p) or codec info
5. Focus on the main season/episode identifier in the filename

OUTPUT FORMAT: S##E## (zero-padded numbers)
EXAMPLES: S01E04, S02E15, S01E23, S03E01

If no season/episode pattern is found, respond: {NO_EPISODE_REPLY}"
    )
}

/// Render a season map as `{1: 24, 2: 12}`
pub fn format_season_map(entry: &ShowCatalogEntry) -> String {
    let seasons: Vec<String> = entry
        .seasons
        .iter()
        .map(|(season, count)| format!("{}: {}", season, count))
        .collect();
    format!("{{{}}}", seasons.join(", "))
}

/// Prompt asking for the continuous episode index of an anime episode
pub fn continuous_mapping_prompt(entry: &ShowCatalogEntry, guess: EpisodeGuess) -> String {
    let season = guess.season;
    let episode = guess.episode;

    format!(
        "You are an expert at anime episode numbering. Analyze this catalog data for an anime show:

Show: {name}
Catalog Season Data: {seasons}
Total Episodes in Catalog: {total}

The file shows: Season {season} Episode {episode}

TASK: Determine the correct continuous episode number for Season 1.

CONTEXT:
- Anime typically has 12-13 episodes per season (called \"cours\")
- Catalogs often combine multiple seasons/cours into one season
- For continuous numbering: Season 2 Episode 1 = Season 1's episode count + 1
- Most anime: Season 1 = episodes 1-12, Season 2 = episodes 13-24, etc.

If the catalog shows Season 1 with 24-26 episodes, it likely combined 2 seasons worth of episodes.
In this case use 12 episodes per season for the calculation, NOT the catalog count.

ANALYSIS:
- If Season 1 shows 12-13 episodes: use that count
- If Season 1 shows 24-26 episodes: it is likely 2 seasons combined, use 12 per season
- For Season {season} Episode {episode}: calculate as (Season-1) x 12 + Episode

What continuous episode number should Season {season} Episode {episode} be?

Respond with ONLY the episode number (e.g. \"15\" for episode 15).
If unsure, respond: {UNKNOWN_REPLY}",
        name = entry.name,
        seasons = format_season_map(entry),
        total = entry.total_episodes,
    )
}
