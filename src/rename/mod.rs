mod batch;
mod name_builder;
mod types;

pub use batch::{RenameBatch, RenameError, RenameOptions};
pub use name_builder::{build_base_name, synthesize, NameRequest, Synthesis};
pub use types::{RenameOperation, RunSummary, ShowRenameResult, SkipReason, SkippedFile};
