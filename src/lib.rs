//! Popular and trending rankings for a plugin directory.
//!
//! Plugins are scored by a weighted sum of engagement metrics (views, GitHub
//! stars and forks, upvotes, comments) and age terms. The "Popular" and
//! "Trending" lists differ only in their weight profile and in the recency
//! bonuses Trending adds on top.

pub mod catalog;
pub mod config;
pub mod error;
pub mod plugin;
pub mod ranking;
pub mod server;
pub mod service;
pub mod source;
pub mod tracing;

pub use catalog::{Catalog, CatalogQuery, InMemoryCatalog, JsonFileCatalog};
pub use error::CatalogError;
pub use plugin::{Comment, GithubData, PluginRecord, PluginStatus, Rating};
pub use ranking::{
    DEFAULT_LIMIT, Ranker, ScoredPlugin, TrendingBonus, WeightProfile, calculate_score,
    rank_popular, rank_trending,
};
pub use server::RankingServer;
pub use service::{RankingRequest, RankingService};
pub use source::RankingDataSource;
