use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::parser::{is_video_file, show_name_from_filename, show_name_from_folder};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// Video files grouped by the show they appear to belong to
pub type ShowFiles = BTreeMap<String, Vec<PathBuf>>;

/// Check that the scan root exists, is a directory and can be listed
pub fn validate_root(target: &Path) -> Result<(), ScannerError> {
    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    Ok(())
}

/// Walk `root` recursively and group every video file by show name.
///
/// Files inside a subfolder take the folder's name; files sitting directly in
/// the root are named after the first words of their own filename.
pub fn group_files_by_show(root: &Path) -> Result<ShowFiles, ScannerError> {
    debug!(path = ?root, "Scanning directory");

    validate_root(root)?;

    let mut shows = ShowFiles::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        trace!(entry = ?path, "Examining entry");

        if !is_video_file(path) {
            trace!(path = ?path, "Skipping non-video file");
            continue;
        }

        let show_name = match path.parent() {
            Some(parent) if parent != root => parent
                .file_name()
                .and_then(|n| show_name_from_folder(&n.to_string_lossy())),
            _ => path
                .file_stem()
                .and_then(|s| show_name_from_filename(&s.to_string_lossy())),
        };

        match show_name {
            Some(name) => {
                debug!(show = %name, file = ?path, "Found episode file");
                shows.entry(name).or_default().push(path.to_path_buf());
            }
            None => debug!(file = ?path, "Could not derive a show name, skipping"),
        }
    }

    for files in shows.values_mut() {
        files.sort();
    }

    debug!(count = shows.len(), "Scan complete");

    Ok(shows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let result = group_files_by_show(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_groups_by_parent_folder() {
        let dir = tempdir().unwrap();
        let show_dir = dir.path().join("Example_Show");
        fs::create_dir(&show_dir).unwrap();
        fs::write(show_dir.join("ep2.mkv"), "").unwrap();
        fs::write(show_dir.join("ep1.mkv"), "").unwrap();

        let result = group_files_by_show(dir.path()).unwrap();

        assert_eq!(result.len(), 1);
        let files = &result["Example Show"];
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("ep1.mkv"));
        assert!(files[1].ends_with("ep2.mkv"));
    }

    #[test]
    fn test_nested_folders_use_immediate_parent() {
        let dir = tempdir().unwrap();
        let season_dir = dir.path().join("Sample Anime").join("Season 2");
        fs::create_dir_all(&season_dir).unwrap();
        fs::write(season_dir.join("x.mp4"), "").unwrap();

        let result = group_files_by_show(dir.path()).unwrap();

        assert!(result.contains_key("Season 2"));
    }

    #[test]
    fn test_root_files_grouped_by_filename() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Some.Show.Name.S01E01.mkv"), "").unwrap();
        fs::write(dir.path().join("Some.Show.Name.S01E01.srt"), "").unwrap();

        let result = group_files_by_show(dir.path()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result["Some Show Name"].len(), 1);
    }

    #[test]
    fn test_ignores_non_video_files() {
        let dir = tempdir().unwrap();
        let show_dir = dir.path().join("Show");
        fs::create_dir(&show_dir).unwrap();
        fs::write(show_dir.join("notes.txt"), "").unwrap();
        fs::write(show_dir.join("cover.jpg"), "").unwrap();

        let result = group_files_by_show(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_path_not_found() {
        let result = group_files_by_show(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(ScannerError::PathNotFound(_))));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.mkv");
        fs::write(&file_path, "content").unwrap();

        let result = group_files_by_show(&file_path);
        assert!(matches!(result, Err(ScannerError::NotADirectory(_))));
    }
}
