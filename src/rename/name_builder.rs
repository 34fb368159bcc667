use std::path::{Path, PathBuf};

use crate::episode::ResolvedEpisode;
use crate::sanitize::{sanitize_fragment, sanitize_title};

/// Inputs for building a canonical episode filename
#[derive(Debug, Clone)]
pub struct NameRequest<'a> {
    pub show_name: &'a str,
    pub resolved: ResolvedEpisode,
    pub title: Option<&'a str>,
    pub resolution: Option<&'a str>,
    /// Extension including the leading dot, e.g. `.mkv`
    pub suffix: &'a str,
}

/// Outcome of synthesizing a name for an existing file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesis {
    Rename { name: String, path: PathBuf },
    /// The file already carries its canonical name
    Unchanged,
}

/// Sanitized pieces of a filename, joined by [`NameParts::render`]
#[derive(Debug, Clone)]
struct NameParts {
    show: String,
    code: String,
    title: Option<String>,
    resolution: Option<String>,
    suffix: String,
}

impl NameParts {
    fn from_request(request: &NameRequest<'_>) -> Self {
        let episode = request.resolved.episode.to_string();
        let title = request
            .title
            .map(sanitize_title)
            .filter(|t| !t.is_empty() && *t != episode);

        Self {
            show: sanitize_fragment(request.show_name),
            code: format!(
                "S{:02}EP{:03}",
                request.resolved.season, request.resolved.episode
            ),
            title,
            resolution: request
                .resolution
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            suffix: request.suffix.to_string(),
        }
    }

    /// `Show.S01EP001[.Title][_N][.res]ext`
    fn render(&self, counter: Option<u32>) -> String {
        let mut name = format!("{}.{}", self.show, self.code);

        if let Some(title) = &self.title {
            name.push('.');
            name.push_str(title);
        }

        if let Some(n) = counter {
            name.push_str(&format!("_{}", n));
        }

        if let Some(resolution) = &self.resolution {
            name.push('.');
            name.push_str(resolution);
        }

        name.push_str(&self.suffix);
        name
    }
}

/// Canonical filename with no collision counter
pub fn build_base_name(request: &NameRequest<'_>) -> String {
    NameParts::from_request(request).render(None)
}

/// Pick a collision-free name for `original` in its own directory.
///
/// `exists` reports whether a candidate path is taken. Counters start at 1
/// and sit between the title (or episode code) and the resolution tag.
pub fn synthesize(
    request: &NameRequest<'_>,
    original: &Path,
    exists: impl Fn(&Path) -> bool,
) -> Synthesis {
    let parts = NameParts::from_request(request);
    let parent = original.parent().unwrap_or_else(|| Path::new(""));

    let mut name = parts.render(None);
    let mut path = parent.join(&name);
    let mut counter = 1;

    while path != original && exists(&path) {
        name = parts.render(Some(counter));
        path = parent.join(&name);
        counter += 1;
    }

    if path == original {
        Synthesis::Unchanged
    } else {
        Synthesis::Rename { name, path }
    }
}
