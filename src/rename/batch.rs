use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use chrono::Local;

use crate::catalog::Catalog;
use crate::episode::{EpisodeLocator, TitledEpisode};
use crate::inference::{extract_episode, Oracle};
use crate::parser::{detect_resolution, file_suffix};
use crate::history::{append_show_record, ShowRecord};
use crate::progress::Progress;
use crate::scanner::ShowFiles;
use crate::season::{SeasonError, SeasonStructureModel};

use super::name_builder::{synthesize, NameRequest, Synthesis};
use super::types::{file_name_of, RenameOperation, RunSummary, ShowRenameResult, SkipReason};

/// Errors that stop a whole show from being processed
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Show not found in catalog: {0}")]
    ShowNotFound(String),

    #[error("Catalog lookup failed for '{name}': {message}")]
    CatalogError { name: String, message: String },
}

impl From<SeasonError> for RenameError {
    fn from(err: SeasonError) -> Self {
        match err {
            SeasonError::ShowNotFound(name) => RenameError::ShowNotFound(name),
            SeasonError::Catalog { name, source } => RenameError::CatalogError {
                name,
                message: source.to_string(),
            },
        }
    }
}

/// Options for a rename run
#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    pub dry_run: bool,
}

/// Renames the files of one show at a time.
///
/// Holds the run-scoped season cache and the set of paths claimed or vacated
/// by earlier renames, so collision checks see the run's own effects even in
/// dry-run mode.
pub struct RenameBatch<'a> {
    seasons: SeasonStructureModel<'a>,
    locator: EpisodeLocator<'a>,
    oracle: &'a dyn Oracle,
    options: RenameOptions,
    claimed: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl<'a> RenameBatch<'a> {
    pub fn new(catalog: &'a dyn Catalog, oracle: &'a dyn Oracle, options: RenameOptions) -> Self {
        Self {
            seasons: SeasonStructureModel::new(catalog),
            locator: EpisodeLocator::new(oracle),
            oracle,
            options,
            claimed: HashSet::new(),
            vacated: HashSet::new(),
        }
    }

    /// Rename every file of `show_name`.
    ///
    /// Fails only when the show itself cannot be matched; per-file problems
    /// are recorded as skipped files.
    pub fn rename_show(
        &mut self,
        show_name: &str,
        files: &[PathBuf],
        progress: &mut Progress,
    ) -> Result<ShowRenameResult, RenameError> {
        info!("Processing show: {} ({} files)", show_name, files.len());

        let entry = self.seasons.lookup(show_name)?;
        let total = files.len();
        let mut result = ShowRenameResult::new(show_name, self.options.dry_run);

        progress.show_start(show_name, total);

        for (i, path) in files.iter().enumerate() {
            let file_name = file_name_of(path);

            let Some(guess) = extract_episode(self.oracle, &file_name) else {
                warn!("No episode info found in '{}', skipping", file_name);
                progress.warn(&format!("Skipping '{}': no episode info found", file_name));
                result.skip(file_name, SkipReason::NoEpisodeGuess);
                continue;
            };

            let resolved = self.locator.resolve(&entry, guess);
            let TitledEpisode { resolved, title } =
                self.locator
                    .resolve_title(self.seasons.catalog(), &entry, guess, resolved);

            let naming_title = match &title {
                Some(t) => t.clone(),
                None => {
                    warn!(
                        "No title found for {} of '{}', using episode number",
                        resolved, show_name
                    );
                    resolved.episode.to_string()
                }
            };

            let resolution = detect_resolution(&file_name);
            let suffix = file_suffix(path);
            let request = NameRequest {
                show_name,
                resolved,
                title: Some(&naming_title),
                resolution: resolution.as_deref(),
                suffix: &suffix,
            };

            let destination = match self.plan(&request, path) {
                Some(destination) => destination,
                None => {
                    debug!("'{}' already has its canonical name", file_name);
                    result.unchanged.push(file_name);
                    continue;
                }
            };

            let operation = RenameOperation::new(path.clone(), destination, guess, resolved, title);

            if !self.options.dry_run {
                if let Err(e) = fs::rename(&operation.source_path, &operation.destination_path) {
                    error!(
                        "Failed to rename '{}' to '{}': {}",
                        operation.source_name, operation.destination_name, e
                    );
                    progress.warn(&format!("Failed to rename '{}': {}", file_name, e));
                    result.skip(file_name, SkipReason::RenameFailed(e.to_string()));
                    continue;
                }
                info!(
                    "Renamed '{}' -> '{}'",
                    operation.source_name, operation.destination_name
                );
            }

            self.record(&operation);
            progress.rename_progress(
                i + 1,
                total,
                &operation.source_name,
                &operation.destination_name,
            );
            result.add_operation(operation);
        }

        Ok(result)
    }

    /// Rename every show in turn and append each show's decisions to
    /// `run_log` when one is given.
    ///
    /// Unmatched shows and run log write failures are recorded in the
    /// summary; processing always continues with the next show.
    pub fn rename_all(
        &mut self,
        shows: &ShowFiles,
        run_log: Option<&Path>,
        progress: &mut Progress,
    ) -> RunSummary {
        let mut summary = RunSummary::new(self.options.dry_run);
        let mut log_written = false;

        for (show_name, files) in shows {
            let result = match self.rename_show(show_name, files, progress) {
                Ok(result) => result,
                Err(e) => {
                    warn!("Skipping show '{}': {}", show_name, e);
                    progress.show_skipped(show_name, &e.to_string());
                    summary.missing_shows.push((show_name.clone(), e.to_string()));
                    continue;
                }
            };

            let entries = result.log_entries();
            if let Some(path) = run_log.filter(|_| !entries.is_empty()) {
                let record = ShowRecord::new(show_name.as_str(), entries, Local::now());
                match append_show_record(path, record) {
                    Ok(_) => log_written = true,
                    Err(e) => {
                        error!("Failed to write run log for '{}': {}", show_name, e);
                        progress.warn(&format!(
                            "Could not log renames for '{}': {}",
                            show_name, e
                        ));
                        summary.log_failures.push((show_name.clone(), e.to_string()));
                    }
                }
            }

            summary.shows.push(result);
        }

        if let (true, Some(path)) = (log_written, run_log) {
            progress.log_written(path);
        }

        summary
    }

    fn plan(&self, request: &NameRequest<'_>, original: &Path) -> Option<PathBuf> {
        let occupied = |p: &Path| {
            self.claimed.contains(p) || (p.exists() && !self.vacated.contains(p))
        };

        match synthesize(request, original, occupied) {
            Synthesis::Rename { path, .. } => Some(path),
            Synthesis::Unchanged => None,
        }
    }

    fn record(&mut self, operation: &RenameOperation) {
        self.claimed.remove(&operation.source_path);
        self.vacated.insert(operation.source_path.clone());
        self.vacated.remove(&operation.destination_path);
        self.claimed.insert(operation.destination_path.clone());
    }
}
