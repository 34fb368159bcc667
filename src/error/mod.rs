mod codes;

pub use codes::ExitCode;

use crate::catalog::CatalogError;
use crate::history::HistoryError;
use crate::inference::InferenceError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("TMDB_API_KEY is not set")]
    MissingApiKey,

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Inference error: {message}")]
    InferenceError { message: String },

    #[error("Run log error: {message}")]
    HistoryError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::MissingApiKey => ExitCode::ConfigError,
            AppError::CatalogError { .. } => ExitCode::CatalogError,
            AppError::InferenceError { .. } => ExitCode::InferenceError,
            AppError::HistoryError { .. } => ExitCode::HistoryError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::MissingApiKey => String::from(
                "No TMDb API key configured.\n\n\
                 Set TMDB_API_KEY in the environment or in a .env file\n\
                 in the current directory, e.g.:\n  TMDB_API_KEY=your_key_here",
            ),

            AppError::CatalogError { message } => {
                format!(
                    "Failed to set up the TMDb client:\n  {}\n\n\
                     Check TMDB_API_KEY and your internet connection.",
                    message
                )
            }

            AppError::InferenceError { message } => {
                format!(
                    "Failed to set up the inference client:\n  {}\n\n\
                     Check that Ollama is running and OLLAMA_HOST is correct.",
                    message
                )
            }

            AppError::HistoryError { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Run log error:\n  {}\n{}\n\
                     Ensure the directory is writable and any existing log is valid JSON.",
                    message, path_info
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotConfigured => AppError::MissingApiKey,
            other => AppError::CatalogError {
                message: other.to_string(),
            },
        }
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::InferenceError {
            message: err.to_string(),
        }
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        AppError::HistoryError {
            path: None,
            message: err.to_string(),
        }
    }
}
