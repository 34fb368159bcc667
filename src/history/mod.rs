mod reader;
mod types;
mod writer;

pub use reader::read_run_log;
pub use types::{run_log_filename, RunLogEntry, ShowRecord, RUN_LOG_PREFIX};
pub use writer::{append_show_record, run_log_path, HistoryError};
