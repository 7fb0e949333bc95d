//! Ordering a catalog by score.

use super::{NoBonus, RecencyBonus, TrendingBonus, WeightProfile, calculate_score};
use crate::plugin::PluginRecord;
use chrono::{DateTime, Utc};

/// Number of plugins returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 8;

/// A plugin paired with the score it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlugin {
    pub plugin: PluginRecord,
    pub score: f64,
}

/// A ranking mode: a weight profile plus a bonus strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranker<B> {
    weights: WeightProfile,
    bonus: B,
}

impl Ranker<NoBonus> {
    /// The "Popular" list: established quality, no bonuses.
    pub const fn popular() -> Self {
        Self::new(WeightProfile::POPULAR, NoBonus)
    }
}

impl Ranker<TrendingBonus> {
    /// The "Trending" list: recent momentum plus comment and update bonuses.
    pub fn trending() -> Self {
        Self::new(WeightProfile::TRENDING, TrendingBonus::default())
    }
}

impl<B: RecencyBonus> Ranker<B> {
    pub const fn new(weights: WeightProfile, bonus: B) -> Self {
        Self { weights, bonus }
    }

    /// Base score plus this mode's bonus.
    pub fn score(&self, plugin: &PluginRecord, now: DateTime<Utc>) -> f64 {
        calculate_score(plugin, &self.weights, now) + self.bonus.bonus(plugin, now)
    }

    /// The `limit` highest-scoring plugins, best first.
    ///
    /// Equal scores keep their input order.
    pub fn rank_scored(
        &self,
        plugins: &[PluginRecord],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<ScoredPlugin> {
        let mut scores: Vec<(usize, f64)> = plugins
            .iter()
            .enumerate()
            .map(|(index, plugin)| (index, self.score(plugin, now)))
            .collect();

        // sort_by is stable
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores.truncate(limit);

        tracing::trace!(candidates = plugins.len(), ranked = scores.len(), "Ranked plugins");

        scores
            .into_iter()
            .map(|(index, score)| ScoredPlugin {
                plugin: plugins[index].clone(),
                score,
            })
            .collect()
    }

    /// Same as [`rank_scored`](Self::rank_scored) without the scores.
    pub fn rank(
        &self,
        plugins: &[PluginRecord],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<PluginRecord> {
        self.rank_scored(plugins, limit, now)
            .into_iter()
            .map(|scored| scored.plugin)
            .collect()
    }
}

/// Rank `plugins` for the "Popular" list.
pub fn rank_popular(
    plugins: &[PluginRecord],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<PluginRecord> {
    Ranker::popular().rank(plugins, limit, now)
}

/// Rank `plugins` for the "Trending" list.
pub fn rank_trending(
    plugins: &[PluginRecord],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<PluginRecord> {
    Ranker::trending().rank(plugins, limit, now)
}
