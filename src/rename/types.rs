use std::fmt;
use std::path::PathBuf;

use crate::episode::{EpisodeGuess, ResolvedEpisode};
use crate::history::RunLogEntry;

/// A single planned or performed file rename
#[derive(Debug, Clone)]
pub struct RenameOperation {
    /// Full path to the source file
    pub source_path: PathBuf,
    /// Original file name
    pub source_name: String,
    /// Full path to the destination
    pub destination_path: PathBuf,
    /// New file name
    pub destination_name: String,
    pub detected: EpisodeGuess,
    pub resolved: ResolvedEpisode,
    /// Catalog title, `None` when the catalog had none
    pub title: Option<String>,
}

impl RenameOperation {
    pub fn new(
        source_path: PathBuf,
        destination_path: PathBuf,
        detected: EpisodeGuess,
        resolved: ResolvedEpisode,
        title: Option<String>,
    ) -> Self {
        let source_name = file_name_of(&source_path);
        let destination_name = file_name_of(&destination_path);

        Self {
            source_path,
            source_name,
            destination_path,
            destination_name,
            detected,
            resolved,
            title,
        }
    }

    pub fn log_entry(&self) -> RunLogEntry {
        RunLogEntry {
            original: self.source_name.clone(),
            detected: self.detected.code(),
            final_code: self.resolved.code(),
            new_name: self.destination_name.clone(),
            title: self.title.clone(),
        }
    }
}

pub(crate) fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Why a file was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No season/episode marker could be read from the name
    NoEpisodeGuess,
    /// The filesystem refused the rename
    RenameFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoEpisodeGuess => write!(f, "no episode info found"),
            SkipReason::RenameFailed(e) => write!(f, "rename failed: {}", e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Outcome of renaming one show's files
#[derive(Debug, Clone)]
pub struct ShowRenameResult {
    pub show_name: String,
    pub dry_run: bool,
    pub operations: Vec<RenameOperation>,
    /// Files already carrying their canonical name
    pub unchanged: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl ShowRenameResult {
    pub fn new(show_name: impl Into<String>, dry_run: bool) -> Self {
        Self {
            show_name: show_name.into(),
            dry_run,
            operations: Vec::new(),
            unchanged: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn add_operation(&mut self, op: RenameOperation) {
        self.operations.push(op);
    }

    pub fn skip(&mut self, file_name: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedFile {
            file_name: file_name.into(),
            reason,
        });
    }

    pub fn log_entries(&self) -> Vec<RunLogEntry> {
        self.operations.iter().map(RenameOperation::log_entry).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }
}

/// Everything that happened during one run, across shows
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub dry_run: bool,
    pub shows: Vec<ShowRenameResult>,
    /// Shows the catalog could not match, with the reason
    pub missing_shows: Vec<(String, String)>,
    /// Shows whose run log record could not be written, with the error
    pub log_failures: Vec<(String, String)>,
}

impl RunSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    pub fn renamed_count(&self) -> usize {
        self.shows.iter().map(ShowRenameResult::len).sum()
    }

    pub fn unchanged_count(&self) -> usize {
        self.shows.iter().map(|s| s.unchanged.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.shows.iter().map(|s| s.skipped.len()).sum()
    }
}
