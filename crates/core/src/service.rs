//! Public entry points for listing and resolving list filters

use crate::catalog::{ListCatalog, SessionGateway, SessionState, StaticCatalog};
use crate::error::FilterResult;
use crate::factory::filter_from_list;
use crate::filter::Filter;
use tracing::debug;

/// Exposes one filter per remote list
///
/// Holds no state of its own. Every call reads the session and the catalog
/// afresh and builds new filters, so results reflect whatever snapshot the
/// collaborators return at call time.
pub struct FilterCatalogService<S, C> {
    session: S,
    catalog: C,
}

impl<S: SessionGateway, C: ListCatalog> FilterCatalogService<S, C> {
    /// Create a service over the given session and list catalog
    pub fn new(session: S, catalog: C) -> Self {
        Self { session, catalog }
    }

    /// Filters for every known list, in catalog order
    ///
    /// Returns an empty vector when no remote account is signed in.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if a filter's query could not be assembled.
    pub fn list_filters(&self) -> FilterResult<Vec<Filter>> {
        if !self.session.is_authenticated() {
            debug!("not signed in, exposing no list filters");
            return Ok(Vec::new());
        }

        let lists = self.catalog.all_lists();
        debug!(count = lists.len(), "building list filters");

        lists.iter().map(filter_from_list).collect()
    }

    /// The filter for the list with local id `id`
    ///
    /// Returns `None` when signed out or when no such list exists.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the filter's query could not be assembled.
    pub fn get_filter(&self, id: i64) -> FilterResult<Option<Filter>> {
        if !self.session.is_authenticated() {
            debug!(id, "not signed in, no filter");
            return Ok(None);
        }

        match self.catalog.list_by_id(id) {
            Some(list) => filter_from_list(&list).map(Some),
            None => {
                debug!(id, "no list with this id");
                Ok(None)
            }
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

// Shareable across threads when its collaborators are
static_assertions::assert_impl_all!(FilterCatalogService<SessionState, StaticCatalog>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RemoteList;
    use std::cell::Cell;

    fn signed_in() -> SessionState {
        SessionState::SignedIn {
            account: "me@example.com".to_string(),
        }
    }

    fn two_lists() -> StaticCatalog {
        StaticCatalog::new(vec![
            RemoteList::new(1, "r-one", "One"),
            RemoteList::new(2, "r-two", "Two"),
        ])
    }

    /// Catalog that counts how often it is asked for lists
    struct CountingCatalog {
        inner: StaticCatalog,
        calls: Cell<usize>,
    }

    impl ListCatalog for CountingCatalog {
        fn all_lists(&self) -> Vec<RemoteList> {
            self.calls.set(self.calls.get() + 1);
            self.inner.all_lists()
        }

        fn list_by_id(&self, id: i64) -> Option<RemoteList> {
            self.calls.set(self.calls.get() + 1);
            self.inner.list_by_id(id)
        }
    }

    #[test]
    fn test_list_filters_signed_out_is_empty() {
        let service = FilterCatalogService::new(SessionState::SignedOut, two_lists());
        assert!(service.list_filters().unwrap().is_empty());
    }

    #[test]
    fn test_list_filters_local_only_is_empty() {
        let service = FilterCatalogService::new(SessionState::LocalOnly, two_lists());
        assert!(service.list_filters().unwrap().is_empty());
    }

    #[test]
    fn test_signed_out_does_not_touch_catalog() {
        let catalog = CountingCatalog {
            inner: two_lists(),
            calls: Cell::new(0),
        };
        let service = FilterCatalogService::new(SessionState::SignedOut, catalog);
        service.list_filters().unwrap();
        service.get_filter(1).unwrap();
        assert_eq!(service.catalog().calls.get(), 0);
    }

    #[test]
    fn test_list_filters_preserves_catalog_order() {
        let service = FilterCatalogService::new(signed_in(), two_lists());
        let names: Vec<String> = service
            .list_filters()
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["One", "Two"]);
    }

    #[test]
    fn test_list_filters_empty_catalog() {
        let service = FilterCatalogService::new(signed_in(), StaticCatalog::default());
        assert!(service.list_filters().unwrap().is_empty());
    }

    #[test]
    fn test_list_filters_is_not_cached() {
        let catalog = CountingCatalog {
            inner: two_lists(),
            calls: Cell::new(0),
        };
        let service = FilterCatalogService::new(signed_in(), catalog);
        let first = service.list_filters().unwrap();
        let second = service.list_filters().unwrap();
        assert_eq!(first, second);
        assert_eq!(service.catalog().calls.get(), 2);
    }

    #[test]
    fn test_get_filter_found() {
        let service = FilterCatalogService::new(signed_in(), two_lists());
        let filter = service.get_filter(2).unwrap().unwrap();
        assert_eq!(filter.name, "Two");
        assert_eq!(filter.list_id(), Some(2));
    }

    #[test]
    fn test_get_filter_missing_is_none() {
        let service = FilterCatalogService::new(signed_in(), two_lists());
        assert_eq!(service.get_filter(99).unwrap(), None);
    }

    #[test]
    fn test_get_filter_signed_out_is_none() {
        let service = FilterCatalogService::new(SessionState::SignedOut, two_lists());
        assert_eq!(service.get_filter(1).unwrap(), None);
    }

    #[test]
    fn test_service_over_borrowed_collaborators() {
        let session = signed_in();
        let catalog = two_lists();
        let service = FilterCatalogService::new(&session, &catalog);
        assert_eq!(service.list_filters().unwrap().len(), 2);
        assert!(service.session().is_authenticated());
    }
}
