pub mod catalog;
pub mod cli;
pub mod episode;
pub mod error;
pub mod history;
pub mod inference;
pub mod logging;
pub mod output;
pub mod parser;
pub mod progress;
pub mod rename;
pub mod sanitize;
pub mod scanner;
pub mod season;

pub use catalog::{Catalog, CatalogConfig, CatalogError, TmdbClient};
pub use episode::{EpisodeGuess, EpisodeLocator, ResolutionSource, ResolvedEpisode};
pub use error::{AppError, ExitCode};
pub use history::{append_show_record, read_run_log, run_log_path, RunLogEntry, ShowRecord};
pub use inference::{InferenceConfig, InferenceError, OllamaClient, Oracle};
pub use progress::Progress;
pub use rename::{RenameBatch, RenameError, RenameOptions, RunSummary, ShowRenameResult};
pub use scanner::{group_files_by_show, validate_root, ScannerError, ShowFiles};
pub use season::{SeasonStructureModel, ShowCatalogEntry};
