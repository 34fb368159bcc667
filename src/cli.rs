use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tvrename")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename TV and anime episode files into Show.S01EP001.Title.1080p.mkv form")]
pub struct Args {
    /// Directory to scan for episode files
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Show what would be renamed without touching any file
    #[arg(short = 'n', long, visible_alias = "dry")]
    pub dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Inference model to use (overrides OLLAMA_MODEL)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Do not write a run log into the scanned directory
    #[arg(long)]
    pub no_log: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["tvrename"]);

        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.dry_run);
        assert_eq!(args.verbose, 0);
        assert!(args.model.is_none());
        assert!(!args.no_log);
    }

    #[test]
    fn test_dry_alias_and_verbosity() {
        let args = Args::parse_from(["tvrename", "/media/tv", "--dry", "-vv", "--model", "llama3"]);

        assert_eq!(args.path, PathBuf::from("/media/tv"));
        assert!(args.dry_run);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.model.as_deref(), Some("llama3"));
    }
}
