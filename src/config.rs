//! Configuration loading.
//!
//! The configuration file is optional TOML. Every key has a default, so an
//! empty file and a missing file behave the same.

use crate::error::Result;
use crate::ranking::{DEFAULT_LIMIT, TrendingBonus, WeightProfile};
use crate::source::PAGE_SIZE;
use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "PLUGIN_RANK_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    /// JSON export of the plugins collection
    pub catalog: Option<PathBuf>,
    /// Ranking length when a caller gives no limit
    pub default_limit: usize,
    /// Maximum number of plugins fetched from the catalog
    pub page_size: usize,
    pub popular: WeightProfile,
    pub trending: WeightProfile,
    pub trending_bonus: TrendingBonus,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            default_limit: DEFAULT_LIMIT,
            page_size: PAGE_SIZE,
            popular: WeightProfile::POPULAR,
            trending: WeightProfile::TRENDING,
            trending_bonus: TrendingBonus::default(),
        }
    }
}

impl RankingConfig {
    /// Parse and validate TOML configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make scores meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        for (section, profile) in [("popular", &self.popular), ("trending", &self.trending)] {
            if let Some(weight) = profile.first_non_finite() {
                bail!("[{}] {} must be a finite number", section, weight);
            }
        }
        let bonus = &self.trending_bonus;
        if !bonus.comment_points.is_finite()
            || bonus.update_tiers.iter().any(|t| !t.points.is_finite())
        {
            bail!("[trending_bonus] points must be finite numbers");
        }
        if bonus.comment_window_days < 0 || bonus.update_tiers.iter().any(|t| t.within_days < 0) {
            bail!("[trending_bonus] windows must not be negative");
        }
        Ok(())
    }
}

/// Default location: `<config dir>/plugin-rank/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("plugin-rank").join("config.toml"))
}

/// Load configuration from a file that must exist.
pub fn load_from(path: &Path) -> Result<RankingConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    RankingConfig::parse(&content).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load configuration from `$PLUGIN_RANK_CONFIG`, then the default location,
/// falling back to built-in defaults when neither file exists.
pub fn load() -> Result<RankingConfig> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return load_from(Path::new(&path));
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_from(&path),
        _ => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(RankingConfig::default())
        }
    }
}
