use chrono::Local;
use clap::Parser;
use tracing::{debug, error, info, warn};

use tvrename::catalog::{self, TmdbClient};
use tvrename::cli::Args;
use tvrename::error::AppError;
use tvrename::history::run_log_path;
use tvrename::inference::{self, OllamaClient};
use tvrename::logging;
use tvrename::output::{display_dry_run, display_execution_result};
use tvrename::progress::{should_use_colors, Progress};
use tvrename::rename::{RenameBatch, RenameOptions};
use tvrename::scanner::{group_files_by_show, validate_root};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    debug!("Environment loaded");

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut progress = Progress::new_with_ui(args.verbose > 0, should_use_colors());

    validate_root(&args.path)?;
    let root = args
        .path
        .canonicalize()
        .map_err(|e| AppError::Other(format!("Cannot resolve {}: {}", args.path.display(), e)))?;

    let shows = group_files_by_show(&root)?;
    if shows.is_empty() {
        warn!("No video files found in {:?}", root);
        println!("No video files found in {}", root.display());
        return Ok(());
    }

    info!("Found {} shows to process", shows.len());

    let catalog_config = catalog::config_from_env();
    if !catalog_config.is_configured() {
        return Err(AppError::MissingApiKey);
    }
    let tmdb = TmdbClient::new(catalog_config)?;

    let mut inference_config = inference::config_from_env();
    if let Some(model) = &args.model {
        inference_config.model = model.clone();
    }
    let ollama = OllamaClient::new(inference_config)?;

    match ollama.check_model() {
        Ok(true) => debug!("Using model {}", ollama.model()),
        Ok(false) => {
            warn!("Model {} is not installed on the inference server", ollama.model());
            progress.warn(&format!(
                "Model '{}' not found, episode detection will fail until it is pulled",
                ollama.model()
            ));
        }
        Err(e) => {
            warn!("Inference server check failed: {}", e);
            progress.warn(&format!("Inference server unavailable: {}", e));
        }
    }

    let options = RenameOptions {
        dry_run: args.dry_run,
    };
    let mut batch = RenameBatch::new(&tmdb, &ollama, options);
    let log_path = run_log_path(&root, Local::now());
    let run_log = (!args.no_log).then_some(log_path.as_path());

    let summary = batch.rename_all(&shows, run_log, &mut progress);

    let mut stdout = std::io::stdout();
    let displayed = if summary.dry_run {
        display_dry_run(&summary, &mut stdout)
    } else {
        display_execution_result(&summary, &mut stdout)
    };
    displayed.map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    if let Some((_, message)) = summary.log_failures.first() {
        return Err(AppError::HistoryError {
            path: Some(log_path),
            message: message.clone(),
        });
    }

    Ok(())
}
