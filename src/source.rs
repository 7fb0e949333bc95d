//! Request-scoped access to the eligible plugin set.
//!
//! A [`RankingDataSource`] queries the catalog at most once. Create one per
//! incoming request so both rankers share a single fetch while separate
//! requests always see fresh data.

use crate::catalog::{Catalog, CatalogQuery};
use crate::plugin::PluginRecord;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Maximum number of plugins considered for ranking.
pub const PAGE_SIZE: usize = 100;

/// Fetches published plugins once and hands out the memoized result.
pub struct RankingDataSource {
    catalog: Arc<dyn Catalog>,
    page_size: usize,
    plugins: OnceCell<Arc<[PluginRecord]>>,
}

impl std::fmt::Debug for RankingDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingDataSource")
            .field("page_size", &self.page_size)
            .field("fetched", &self.plugins.get().map(|p| p.len()))
            .finish_non_exhaustive()
    }
}

impl RankingDataSource {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self::with_page_size(catalog, PAGE_SIZE)
    }

    pub fn with_page_size(catalog: Arc<dyn Catalog>, page_size: usize) -> Self {
        Self {
            catalog,
            page_size,
            plugins: OnceCell::new(),
        }
    }

    /// Published plugins, fetched on first use.
    ///
    /// A catalog failure is logged and yields an empty set, which is then
    /// memoized like any other result.
    pub async fn fetch_eligible_plugins(&self) -> Arc<[PluginRecord]> {
        self.plugins
            .get_or_init(|| self.fetch_uncached())
            .await
            .clone()
    }

    async fn fetch_uncached(&self) -> Arc<[PluginRecord]> {
        let query = CatalogQuery::published_plugins(self.page_size);

        let mut plugins = match self.catalog.find(&query).await {
            Ok(plugins) => plugins,
            Err(e) => {
                tracing::warn!("Plugin catalog fetch failed, ranking an empty catalog: {}", e);
                return Arc::from([]);
            }
        };

        let returned = plugins.len();
        plugins.retain(PluginRecord::is_published);
        plugins.truncate(self.page_size);
        if plugins.len() < returned {
            tracing::debug!(
                returned,
                kept = plugins.len(),
                "Catalog returned records outside the query"
            );
        }

        tracing::debug!(count = plugins.len(), "Fetched eligible plugins");
        plugins.into()
    }
}
