//! In-memory catalog for embedding and tests.

use super::{Catalog, CatalogQuery, PLUGINS_COLLECTION, apply_query};
use crate::error::CatalogError;
use crate::plugin::PluginRecord;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fixed set of plugin records served from memory.
///
/// Counts the queries it answers so callers can observe memoization.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    plugins: Vec<PluginRecord>,
    /// When set, every query fails with [`CatalogError::Unavailable`]
    outage: Option<String>,
    queries: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new(plugins: Vec<PluginRecord>) -> Self {
        Self {
            plugins,
            ..Self::default()
        }
    }

    /// A catalog whose every query fails.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            outage: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Number of `find` calls served so far, failed ones included.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl Catalog for InMemoryCatalog {
    fn find<'a>(
        &'a self,
        query: &'a CatalogQuery,
    ) -> BoxFuture<'a, Result<Vec<PluginRecord>, CatalogError>> {
        self.queries.fetch_add(1, Ordering::Relaxed);

        let result = if let Some(reason) = &self.outage {
            Err(CatalogError::Unavailable(reason.clone()))
        } else if query.collection != PLUGINS_COLLECTION {
            Err(CatalogError::UnknownCollection(query.collection.clone()))
        } else {
            Ok(apply_query(self.plugins.iter().cloned(), query))
        };

        futures::future::ready(result).boxed()
    }
}
