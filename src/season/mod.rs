mod store;
mod types;

pub use store::SeasonStructureModel;
pub use types::{is_continuous_candidate, SeasonError, ShowCatalogEntry};
