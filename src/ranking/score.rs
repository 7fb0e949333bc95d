//! Base score for a single plugin under a weight profile.
//!
//! The score is a sum of independent terms, each `metric * weight`. Metrics
//! that are absent from the record contribute exactly zero. Age and update
//! recency enter through [`age_decay`], which is larger for younger
//! timestamps.

use super::WeightProfile;
use crate::plugin::PluginRecord;
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Ages below this many days are clamped before taking the logarithm.
///
/// `1 / ln(d)` diverges as `d` approaches 1, so the floor sits at 2 days,
/// which caps the decay factor at `1 / ln 2`.
pub const MIN_AGE_DAYS: f64 = 2.0;

/// Fractional days elapsed from `then` to `now`. Negative if `then` is in the future.
pub fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - then).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// `1 / ln(age)` with the age clamped to [`MIN_AGE_DAYS`].
pub fn age_decay(age_days: f64) -> f64 {
    1.0 / age_days.max(MIN_AGE_DAYS).ln()
}

/// Compute the weighted score of `plugin`, measuring ages against `now`.
pub fn calculate_score(plugin: &PluginRecord, weights: &WeightProfile, now: DateTime<Utc>) -> f64 {
    let count = |metric: Option<u64>| metric.unwrap_or(0) as f64;

    let views = count(plugin.views) * weights.view_weight;
    let stars = count(plugin.stars()) * weights.stars_weight;
    let forks = count(plugin.forks()) * weights.forks_weight;
    let upvotes = count(plugin.upvotes()) * weights.upvotes_weight;
    let comments = plugin.comments.len() as f64 * weights.comments_weight;

    let age = plugin.created_at.map_or(0.0, |created| {
        age_decay(days_between(created, now)) * weights.age_weight
    });
    let update = plugin.last_updated().map_or(0.0, |updated| {
        age_decay(days_between(updated, now)) * weights.update_recency_weight
    });

    views + stars + forks + upvotes + comments + age + update
}
