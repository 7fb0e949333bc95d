//! Public entry points for the popular and trending plugin lists.
//!
//! [`RankingService`] is long-lived and holds the catalog and ranking modes.
//! Each incoming request opens a [`RankingRequest`], which captures the
//! current instant and owns the request's memoized catalog fetch.

use crate::catalog::Catalog;
use crate::config::RankingConfig;
use crate::plugin::PluginRecord;
use crate::ranking::{DEFAULT_LIMIT, NoBonus, Ranker, ScoredPlugin, TrendingBonus};
use crate::source::{PAGE_SIZE, RankingDataSource};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug)]
struct Modes {
    popular: Ranker<NoBonus>,
    trending: Ranker<TrendingBonus>,
}

/// Shared ranking state; cheap to clone.
#[derive(Clone)]
pub struct RankingService {
    catalog: Arc<dyn Catalog>,
    modes: Arc<Modes>,
    default_limit: usize,
    page_size: usize,
}

impl std::fmt::Debug for RankingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingService")
            .field("modes", &self.modes)
            .field("default_limit", &self.default_limit)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl RankingService {
    /// Service with the built-in weight profiles and bonuses.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            modes: Arc::new(Modes {
                popular: Ranker::popular(),
                trending: Ranker::trending(),
            }),
            default_limit: DEFAULT_LIMIT,
            page_size: PAGE_SIZE,
        }
    }

    /// Service using the profiles, bonuses and limits from `config`.
    pub fn from_config(catalog: Arc<dyn Catalog>, config: &RankingConfig) -> Self {
        Self {
            catalog,
            modes: Arc::new(Modes {
                popular: Ranker::new(config.popular, NoBonus),
                trending: Ranker::new(config.trending, config.trending_bonus.clone()),
            }),
            default_limit: config.default_limit,
            page_size: config.page_size,
        }
    }

    /// Open a request context measured against the current time.
    pub fn request(&self) -> RankingRequest {
        self.request_at(Utc::now())
    }

    /// Open a request context measured against `now`.
    pub fn request_at(&self, now: DateTime<Utc>) -> RankingRequest {
        RankingRequest {
            source: RankingDataSource::with_page_size(self.catalog.clone(), self.page_size),
            modes: self.modes.clone(),
            default_limit: self.default_limit,
            now,
        }
    }
}

/// One logical request: a single instant and at most one catalog fetch.
#[derive(Debug)]
pub struct RankingRequest {
    source: RankingDataSource,
    modes: Arc<Modes>,
    default_limit: usize,
    now: DateTime<Utc>,
}

impl RankingRequest {
    /// The instant every age in this request is measured against.
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Top plugins by established quality.
    pub async fn get_popular_plugins(&self, limit: Option<usize>) -> Vec<PluginRecord> {
        into_plugins(self.popular_scored(limit).await)
    }

    /// Top plugins by recent momentum.
    pub async fn get_trending_plugins(&self, limit: Option<usize>) -> Vec<PluginRecord> {
        into_plugins(self.trending_scored(limit).await)
    }

    pub async fn popular_scored(&self, limit: Option<usize>) -> Vec<ScoredPlugin> {
        let plugins = self.source.fetch_eligible_plugins().await;
        let limit = limit.unwrap_or(self.default_limit);
        tracing::debug!(candidates = plugins.len(), limit, "Ranking popular plugins");
        self.modes.popular.rank_scored(&plugins, limit, self.now)
    }

    pub async fn trending_scored(&self, limit: Option<usize>) -> Vec<ScoredPlugin> {
        let plugins = self.source.fetch_eligible_plugins().await;
        let limit = limit.unwrap_or(self.default_limit);
        tracing::debug!(candidates = plugins.len(), limit, "Ranking trending plugins");
        self.modes.trending.rank_scored(&plugins, limit, self.now)
    }
}

fn into_plugins(scored: Vec<ScoredPlugin>) -> Vec<PluginRecord> {
    scored.into_iter().map(|s| s.plugin).collect()
}
