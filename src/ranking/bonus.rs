//! Additive recency bonuses layered on top of the base score.

use crate::plugin::PluginRecord;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Extra score a ranking mode adds on top of [`calculate_score`](super::calculate_score).
pub trait RecencyBonus {
    fn bonus(&self, plugin: &PluginRecord, now: DateTime<Utc>) -> f64;
}

/// Popular ranking: the base score stands alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBonus;

impl RecencyBonus for NoBonus {
    fn bonus(&self, _plugin: &PluginRecord, _now: DateTime<Utc>) -> f64 {
        0.0
    }
}

/// One step of the update recency bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTier {
    /// Inclusive window, in whole days before now
    pub within_days: i64,
    pub points: f64,
}

/// Trending ranking: points for recent comments and for a recent repository update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendingBonus {
    /// Points per comment posted inside the comment window
    pub comment_points: f64,
    pub comment_window_days: i64,
    /// Checked in order; the first tier containing the last update wins
    pub update_tiers: Vec<UpdateTier>,
}

impl Default for TrendingBonus {
    fn default() -> Self {
        Self {
            comment_points: 5.0,
            comment_window_days: 30,
            update_tiers: vec![
                UpdateTier {
                    within_days: 7,
                    points: 20.0,
                },
                UpdateTier {
                    within_days: 30,
                    points: 10.0,
                },
            ],
        }
    }
}

fn window(days: i64) -> TimeDelta {
    TimeDelta::try_days(days).unwrap_or(TimeDelta::MAX)
}

impl TrendingBonus {
    /// Comments timestamped no earlier than `comment_window_days` before `now`.
    pub fn recent_comment_count(&self, plugin: &PluginRecord, now: DateTime<Utc>) -> usize {
        let window = window(self.comment_window_days);
        plugin
            .comments
            .iter()
            .filter_map(|comment| comment.created_at)
            .filter(|&created| now - created <= window)
            .count()
    }

    /// Points of the first tier whose window contains the last repository update.
    pub fn update_points(&self, plugin: &PluginRecord, now: DateTime<Utc>) -> f64 {
        let Some(updated) = plugin.last_updated() else {
            return 0.0;
        };
        let elapsed = now - updated;
        self.update_tiers
            .iter()
            .find(|tier| elapsed <= window(tier.within_days))
            .map_or(0.0, |tier| tier.points)
    }
}

impl RecencyBonus for TrendingBonus {
    fn bonus(&self, plugin: &PluginRecord, now: DateTime<Utc>) -> f64 {
        let comments = self.recent_comment_count(plugin, now) as f64 * self.comment_points;
        comments + self.update_points(plugin, now)
    }
}
