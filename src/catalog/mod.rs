//! Access to the plugin catalog owned by the CMS.
//!
//! The ranking engine only reads the catalog, through the single [`Catalog::find`]
//! query. Adapters live in submodules: a JSON export on disk and an in-memory
//! catalog.

pub(crate) mod json;
pub(crate) mod memory;

pub use json::JsonFileCatalog;
pub use memory::InMemoryCatalog;

use crate::error::CatalogError;
use crate::plugin::{PluginRecord, PluginStatus};
use futures::future::BoxFuture;

/// Name of the collection holding plugin records.
pub const PLUGINS_COLLECTION: &str = "plugins";

/// A query against one catalog collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub collection: String,
    /// Only records in this state are returned
    pub status: PluginStatus,
    /// Maximum number of records returned
    pub limit: usize,
    /// How many levels of relationships to resolve
    pub depth: u8,
}

impl CatalogQuery {
    /// Published plugins with relationships resolved one level deep.
    pub fn published_plugins(limit: usize) -> Self {
        Self {
            collection: PLUGINS_COLLECTION.to_string(),
            status: PluginStatus::Published,
            limit,
            depth: 1,
        }
    }

    /// Whether `plugin` satisfies the status filter.
    pub fn matches(&self, plugin: &PluginRecord) -> bool {
        plugin.status == self.status
    }
}

/// Read-only query capability supplied by the CMS or storage layer.
pub trait Catalog: Send + Sync {
    fn find<'a>(
        &'a self,
        query: &'a CatalogQuery,
    ) -> BoxFuture<'a, Result<Vec<PluginRecord>, CatalogError>>;
}

/// Apply a query's status filter and limit to records already in memory.
pub(crate) fn apply_query(
    plugins: impl IntoIterator<Item = PluginRecord>,
    query: &CatalogQuery,
) -> Vec<PluginRecord> {
    plugins
        .into_iter()
        .filter(|plugin| query.matches(plugin))
        .take(query.limit)
        .collect()
}
