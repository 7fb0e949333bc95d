//! Weight profiles for the ranking modes.

use serde::{Deserialize, Serialize};

/// Multipliers applied to each raw plugin metric.
///
/// `age_weight` may be negative; the trending profile uses that to work
/// against the age term instead of rewarding it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightProfile {
    pub view_weight: f64,
    pub stars_weight: f64,
    pub forks_weight: f64,
    pub upvotes_weight: f64,
    pub comments_weight: f64,
    pub age_weight: f64,
    pub update_recency_weight: f64,
}

impl WeightProfile {
    /// Established quality: upvotes lead, then stars, with a small maturity bonus.
    pub const POPULAR: Self = Self {
        view_weight: 1.0,
        stars_weight: 2.0,
        forks_weight: 1.5,
        upvotes_weight: 3.0,
        comments_weight: 0.5,
        age_weight: 0.2,
        update_recency_weight: 0.3,
    };

    /// Recent momentum: update recency leads and age counts against the plugin.
    pub const TRENDING: Self = Self {
        view_weight: 2.0,
        stars_weight: 1.5,
        forks_weight: 1.0,
        upvotes_weight: 2.5,
        comments_weight: 2.0,
        age_weight: -0.5,
        update_recency_weight: 3.0,
    };

    /// Name and value of every weight, in declaration order.
    pub const fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("view_weight", self.view_weight),
            ("stars_weight", self.stars_weight),
            ("forks_weight", self.forks_weight),
            ("upvotes_weight", self.upvotes_weight),
            ("comments_weight", self.comments_weight),
            ("age_weight", self.age_weight),
            ("update_recency_weight", self.update_recency_weight),
        ]
    }

    /// First weight that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(_, weight)| !weight.is_finite())
            .map(|(name, _)| name)
    }
}
