//! Catalog backed by a JSON export of the CMS `plugins` collection.

use super::{Catalog, CatalogQuery, PLUGINS_COLLECTION, apply_query};
use crate::error::CatalogError;
use crate::plugin::PluginRecord;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Accepted export layouts: a paginated API response or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Page { docs: Vec<serde_json::Value> },
    List(Vec<serde_json::Value>),
}

impl CatalogFile {
    fn into_records(self) -> Vec<serde_json::Value> {
        match self {
            Self::Page { docs } => docs,
            Self::List(records) => records,
        }
    }
}

/// Reads plugin records from a JSON file on every query.
///
/// The file is re-read each time so a fresh export is picked up by the next
/// request. Malformed fields read as absent; only records without a usable id
/// are skipped, with a warning rather than failing the whole catalog.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self, query: &CatalogQuery) -> Result<Vec<PluginRecord>, CatalogError> {
        if query.collection != PLUGINS_COLLECTION {
            return Err(CatalogError::UnknownCollection(query.collection.clone()));
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let records = file
            .into_records()
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<PluginRecord>(value) {
                Ok(plugin) => Some(plugin),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        index,
                        "Skipping plugin record without a usable id: {}",
                        e
                    );
                    None
                }
            });

        Ok(apply_query(records, query))
    }
}

impl Catalog for JsonFileCatalog {
    fn find<'a>(
        &'a self,
        query: &'a CatalogQuery,
    ) -> BoxFuture<'a, Result<Vec<PluginRecord>, CatalogError>> {
        self.load(query).boxed()
    }
}
