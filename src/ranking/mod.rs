//! Plugin scoring and ranking.
//!
//! This module provides the weighted scoring model behind the "Popular" and
//! "Trending" plugin lists: weight profiles, the base score, recency bonuses,
//! and the generic ranker that sorts and truncates a catalog.

// Module declarations
pub(crate) mod bonus;
pub(crate) mod rank;
pub(crate) mod score;
pub(crate) mod weights;

pub use bonus::{NoBonus, RecencyBonus, TrendingBonus, UpdateTier};
pub use rank::{DEFAULT_LIMIT, Ranker, ScoredPlugin, rank_popular, rank_trending};
pub use score::{MIN_AGE_DAYS, age_decay, calculate_score, days_between};
pub use weights::WeightProfile;
