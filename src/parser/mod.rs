use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Video container extensions picked up by the scanner (lowercase, no dot)
pub const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "avi", "mov", "wmv", "flv", "webm"];

// Resolution tags: 480p, 720p, 1080p, 2160p, 2k, 4k
static RESOLUTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{3,4}p|[24]k)").unwrap());

// Separators commonly used in release names instead of spaces
static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\-.]").unwrap());

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Number of leading words used as the show name for files sitting in the scan root
const ROOT_FILE_NAME_WORDS: usize = 3;

/// Find the resolution tag in a filename, lowercased
pub fn detect_resolution(filename: &str) -> Option<String> {
    RESOLUTION_REGEX
        .captures(filename)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

fn clean_words(raw: &str) -> String {
    let spaced = SEPARATOR_REGEX.replace_all(raw, " ");
    WHITESPACE_REGEX.replace_all(&spaced, " ").trim().to_string()
}

/// Derive a show name from the folder holding the episodes
pub fn show_name_from_folder(folder_name: &str) -> Option<String> {
    let name = clean_words(folder_name);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Guess a show name from a loose file's stem: its first few words
pub fn show_name_from_filename(stem: &str) -> Option<String> {
    let cleaned = clean_words(stem);
    let words: Vec<&str> = cleaned.split(' ').filter(|w| !w.is_empty()).collect();

    if words.len() < 2 {
        return None;
    }

    let take = words.len().min(ROOT_FILE_NAME_WORDS);
    Some(words[..take].join(" "))
}

/// Check whether the path has a known video extension
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// The file extension including its leading dot, case preserved
pub fn file_suffix(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_resolution_common() {
        assert_eq!(
            detect_resolution("Example.Show.S02E05.1080p.mkv"),
            Some("1080p".to_string())
        );
        assert_eq!(detect_resolution("show_720P_x264.mp4"), Some("720p".to_string()));
    }

    #[test]
    fn test_detect_resolution_k_tags() {
        assert_eq!(detect_resolution("Movie.4K.HDR.mkv"), Some("4k".to_string()));
        assert_eq!(detect_resolution("Movie.2k.mkv"), Some("2k".to_string()));
    }

    #[test]
    fn test_detect_resolution_missing() {
        assert_eq!(detect_resolution("Example.Show.S02E05.mkv"), None);
    }

    #[test]
    fn test_show_name_from_folder() {
        assert_eq!(
            show_name_from_folder("Example_Show"),
            Some("Example Show".to_string())
        );
        assert_eq!(
            show_name_from_folder("Sample.Anime - Season 2"),
            Some("Sample Anime Season 2".to_string())
        );
        assert_eq!(show_name_from_folder("..."), None);
    }

    #[test]
    fn test_show_name_from_filename_takes_three_words() {
        assert_eq!(
            show_name_from_filename("Example.Show.S02E05.1080p"),
            Some("Example Show S02E05".to_string())
        );
    }

    #[test]
    fn test_show_name_from_filename_two_words() {
        assert_eq!(
            show_name_from_filename("Show_05"),
            Some("Show 05".to_string())
        );
    }

    #[test]
    fn test_show_name_from_filename_single_word() {
        assert_eq!(show_name_from_filename("episode05"), None);
    }

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("/a/b.mkv")));
        assert!(is_video_file(Path::new("/a/b.MP4")));
        assert!(!is_video_file(Path::new("/a/b.srt")));
        assert!(!is_video_file(Path::new("/a/noext")));
    }

    #[test]
    fn test_file_suffix() {
        assert_eq!(file_suffix(Path::new("a.MKV")), ".MKV");
        assert_eq!(file_suffix(Path::new("a")), "");
    }
}
