//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for plugin-rank operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods for configuration and server plumbing.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when the plugin catalog cannot serve a query.
///
/// Rankers never see this error: the data source logs it and ranks an empty
/// catalog instead.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog export could not be read.
    #[error("failed to read catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalog export is not valid plugin JSON.
    #[error("failed to parse catalog at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The catalog holds no collection with this name.
    #[error("unknown collection '{0}'")]
    UnknownCollection(String),
    /// The backing store is down or refused the query.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
