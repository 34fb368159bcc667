use super::types::{SeasonError, ShowCatalogEntry};
use crate::catalog::Catalog;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Run-scoped memo of show season layouts, keyed by the exact show name
pub struct SeasonStructureModel<'a> {
    catalog: &'a dyn Catalog,
    entries: HashMap<String, ShowCatalogEntry>,
}

impl<'a> SeasonStructureModel<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self {
            catalog,
            entries: HashMap::new(),
        }
    }

    /// Resolve a show's season layout, consulting the catalog on first use only
    pub fn lookup(&mut self, show_name: &str) -> Result<ShowCatalogEntry, SeasonError> {
        if let Some(entry) = self.entries.get(show_name) {
            debug!("Cache hit for '{}'", show_name);
            return Ok(entry.clone());
        }

        let summary = self
            .catalog
            .search_show(show_name)
            .map_err(|source| SeasonError::Catalog {
                name: show_name.to_string(),
                source,
            })?
            .ok_or_else(|| SeasonError::ShowNotFound(show_name.to_string()))?;

        debug!("Matched '{}' to catalog show {} ({})", show_name, summary.id, summary.name);

        let entry = match self.catalog.show_details(summary.id) {
            Ok(details) => ShowCatalogEntry::from_details(&details),
            Err(e) => {
                warn!("Error getting detailed info for '{}': {}", show_name, e);
                ShowCatalogEntry::without_details(&summary)
            }
        };

        info!(
            "Cached show: {} (continuous: {}, total episodes: {})",
            show_name, entry.is_continuous_candidate, entry.total_episodes
        );

        self.entries.insert(show_name.to_string(), entry.clone());
        Ok(entry)
    }

    /// Underlying catalog, for title lookups against the same source
    pub fn catalog(&self) -> &'a dyn Catalog {
        self.catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, Genre, SeasonSummary, ShowDetails, ShowId, ShowSummary};
    use std::cell::Cell;

    struct CountingCatalog {
        searches: Cell<usize>,
        details_fail: bool,
        search_fails: bool,
    }

    impl CountingCatalog {
        fn new() -> Self {
            Self {
                searches: Cell::new(0),
                details_fail: false,
                search_fails: false,
            }
        }
    }

    impl Catalog for CountingCatalog {
        fn search_show(&self, name: &str) -> Result<Option<ShowSummary>, CatalogError> {
            self.searches.set(self.searches.get() + 1);
            if self.search_fails {
                return Err(CatalogError::Timeout);
            }
            if name == "Missing Show" {
                return Ok(None);
            }
            Ok(Some(ShowSummary {
                id: 99,
                name: name.to_string(),
                origin_country: vec!["JP".to_string()],
            }))
        }

        fn show_details(&self, id: ShowId) -> Result<ShowDetails, CatalogError> {
            if self.details_fail {
                return Err(CatalogError::ServerError("boom".to_string()));
            }
            Ok(ShowDetails {
                id,
                name: "Sample Anime".to_string(),
                genres: vec![Genre {
                    id: 16,
                    name: "Animation".to_string(),
                }],
                origin_country: vec!["JP".to_string()],
                seasons: vec![SeasonSummary {
                    season_number: 1,
                    episode_count: 24,
                }],
            })
        }

        fn episode_title(&self, _: ShowId, _: u32, _: u32) -> Result<Option<String>, CatalogError> {
            Ok(None)
        }
    }

    #[test]
    fn test_lookup_builds_entry() {
        let catalog = CountingCatalog::new();
        let mut model = SeasonStructureModel::new(&catalog);

        let entry = model.lookup("Sample Anime").unwrap();

        assert_eq!(entry.id, 99);
        assert_eq!(entry.total_episodes, 24);
        assert!(entry.is_continuous_candidate);
    }

    #[test]
    fn test_cache_hit_skips_catalog() {
        let catalog = CountingCatalog::new();
        let mut model = SeasonStructureModel::new(&catalog);

        let first = model.lookup("Sample Anime").unwrap();
        let second = model.lookup("Sample Anime").unwrap();

        assert_eq!(first, second);
        assert_eq!(catalog.searches.get(), 1);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_cache_key_is_case_sensitive() {
        let catalog = CountingCatalog::new();
        let mut model = SeasonStructureModel::new(&catalog);

        model.lookup("Sample Anime").unwrap();
        model.lookup("sample anime").unwrap();

        assert_eq!(catalog.searches.get(), 2);
    }

    #[test]
    fn test_show_not_found() {
        let catalog = CountingCatalog::new();
        let mut model = SeasonStructureModel::new(&catalog);

        let result = model.lookup("Missing Show");

        assert!(matches!(result, Err(SeasonError::ShowNotFound(_))));
        assert!(model.is_empty());
    }

    #[test]
    fn test_search_failure_reported() {
        let mut catalog = CountingCatalog::new();
        catalog.search_fails = true;
        let mut model = SeasonStructureModel::new(&catalog);

        let result = model.lookup("Sample Anime");
        assert!(matches!(result, Err(SeasonError::Catalog { .. })));
    }

    #[test]
    fn test_detail_failure_degrades() {
        let mut catalog = CountingCatalog::new();
        catalog.details_fail = true;
        let mut model = SeasonStructureModel::new(&catalog);

        let entry = model.lookup("Sample Anime").unwrap();

        assert!(entry.seasons.is_empty());
        assert!(!entry.is_continuous_candidate);
        assert!(!entry.details_available);

        // Memoized even though details were missing
        model.lookup("Sample Anime").unwrap();
        assert_eq!(catalog.searches.get(), 1);
    }
}
