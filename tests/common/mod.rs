//! Shared test fixtures and utilities for integration tests.
//!
//! # Fixtures
//!
//! - `now`: a fixed instant every ranking in a test is measured against
//! - `catalog_dir`: a temp directory for JSON catalog exports
//!
//! # Building plugins
//!
//! [`PluginBuilder`] starts from a published record with no engagement and
//! adds only the metrics a test cares about, with timestamps given as ages
//! relative to [`now_instant`].

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use plugin_rank::{Comment, GithubData, PluginRecord, Rating};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The reference instant for all fixtures.
#[allow(dead_code)] // Used across different integration test crates
pub fn now_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

#[allow(dead_code)] // Used across different integration test crates
#[fixture]
pub fn now() -> DateTime<Utc> {
    now_instant()
}

/// Builder for plugin records with ages relative to [`now_instant`].
#[allow(dead_code)] // Methods used across different integration test crates
#[derive(Debug, Clone)]
pub struct PluginBuilder {
    plugin: PluginRecord,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl PluginBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            plugin: PluginRecord::new(id),
        }
    }

    pub fn views(mut self, views: u64) -> Self {
        self.plugin.views = Some(views);
        self
    }

    pub fn stars(mut self, stars: u64) -> Self {
        self.github().stars = Some(stars);
        self
    }

    pub fn forks(mut self, forks: u64) -> Self {
        self.github().forks = Some(forks);
        self
    }

    pub fn upvotes(mut self, upvotes: u64) -> Self {
        self.plugin.rating = Some(Rating {
            upvotes: Some(upvotes),
        });
        self
    }

    pub fn created(mut self, ago: TimeDelta) -> Self {
        self.plugin.created_at = Some(now_instant() - ago);
        self
    }

    pub fn updated(mut self, ago: TimeDelta) -> Self {
        self.github().last_updated = Some(now_instant() - ago);
        self
    }

    /// One comment per age given.
    pub fn comments(mut self, ages: &[TimeDelta]) -> Self {
        self.plugin.comments.extend(ages.iter().map(|&ago| Comment {
            created_at: Some(now_instant() - ago),
        }));
        self
    }

    pub fn build(self) -> PluginRecord {
        self.plugin
    }

    fn github(&mut self) -> &mut GithubData {
        self.plugin.github_data.get_or_insert_with(GithubData::default)
    }
}

/// A varied catalog of `size` plugins with deterministic metrics.
#[allow(dead_code)] // Used across different integration test crates
pub fn varied_catalog(size: u64) -> Vec<PluginRecord> {
    (0..size)
        .map(|i| {
            let mut builder = PluginBuilder::new(&format!("plugin-{i}"))
                .views((i * 37) % 500)
                .stars((i * 13) % 90)
                .upvotes((i * 7) % 25)
                .created(TimeDelta::days(1 + ((i * 53) % 1200) as i64));
            if i % 3 == 0 {
                builder = builder.updated(TimeDelta::days(((i * 11) % 60) as i64));
            }
            if i % 4 == 0 {
                builder = builder.comments(&[TimeDelta::days((i % 45) as i64), TimeDelta::days(2)]);
            }
            if i % 5 == 0 {
                builder = builder.forks(i % 9);
            }
            builder.build()
        })
        .collect()
}

/// A temp directory holding JSON catalog exports.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct CatalogDir {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl CatalogDir {
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `content` to `name` and returns its path.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Failed to write catalog '{}': {}", name, e));
        path
    }
}

#[allow(dead_code)] // Used across different integration test crates
#[fixture]
pub fn catalog_dir() -> CatalogDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let root = temp.path().to_path_buf();
    CatalogDir { _temp: temp, root }
}
