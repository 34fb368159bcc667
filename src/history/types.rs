use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Prefix of run log filenames written into the scanned root
pub const RUN_LOG_PREFIX: &str = "rename_log_";

/// One file's rename decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLogEntry {
    /// Original file name
    pub original: String,

    /// Numbering read from the file name, `S02E03`
    pub detected: String,

    /// Numbering used for the new name
    #[serde(rename = "final")]
    pub final_code: String,

    /// New file name
    pub new_name: String,

    /// Catalog episode title, null when none was found
    pub title: Option<String>,
}

/// All decisions made for one show during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowRecord {
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
    pub show_name: String,
    pub total_files: usize,
    pub entries: Vec<RunLogEntry>,
}

impl ShowRecord {
    pub fn new(show_name: impl Into<String>, entries: Vec<RunLogEntry>, at: DateTime<Local>) -> Self {
        Self {
            timestamp: at.format("%Y-%m-%d %H:%M:%S").to_string(),
            show_name: show_name.into(),
            total_files: entries.len(),
            entries,
        }
    }
}

/// On-disk shape of a run log; older logs may hold a single record
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RunLogDocument {
    Records(Vec<ShowRecord>),
    Single(ShowRecord),
}

impl RunLogDocument {
    pub(crate) fn into_records(self) -> Vec<ShowRecord> {
        match self {
            RunLogDocument::Records(records) => records,
            RunLogDocument::Single(record) => vec![record],
        }
    }
}

/// Filename for the run log of a run started at `at`
pub fn run_log_filename(at: DateTime<Local>) -> String {
    format!("{}{}.json", RUN_LOG_PREFIX, at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 15, 10, 30, 45).unwrap()
    }

    fn entry() -> RunLogEntry {
        RunLogEntry {
            original: "Example.Show.S02E05.1080p.mkv".to_string(),
            detected: "S02E05".to_string(),
            final_code: "S02E05".to_string(),
            new_name: "Example.Show.S02EP005.The.Return.1080p.mkv".to_string(),
            title: Some("The Return".to_string()),
        }
    }

    #[test]
    fn test_run_log_filename() {
        assert_eq!(run_log_filename(at()), "rename_log_20260115_103045.json");
    }

    #[test]
    fn test_show_record_new() {
        let record = ShowRecord::new("Example Show", vec![entry()], at());

        assert_eq!(record.timestamp, "2026-01-15 10:30:45");
        assert_eq!(record.total_files, 1);
    }

    #[test]
    fn test_entry_serializes_final_key() {
        let json = serde_json::to_value(entry()).unwrap();

        assert_eq!(json["final"], "S02E05");
        assert!(json.get("final_code").is_none());
        assert_eq!(json["title"], "The Return");
    }

    #[test]
    fn test_missing_title_serializes_null() {
        let mut e = entry();
        e.title = None;
        let json = serde_json::to_value(e).unwrap();
        assert!(json["title"].is_null());
    }

    #[test]
    fn test_document_accepts_single_record() {
        let record = ShowRecord::new("Example Show", vec![entry()], at());
        let single = serde_json::to_string(&record).unwrap();
        let list = serde_json::to_string(&vec![record.clone()]).unwrap();

        let from_single: RunLogDocument = serde_json::from_str(&single).unwrap();
        let from_list: RunLogDocument = serde_json::from_str(&list).unwrap();

        assert_eq!(from_single.into_records(), vec![record.clone()]);
        assert_eq!(from_list.into_records(), vec![record]);
    }
}
