//! Plugin records as exported by the CMS catalog.
//!
//! Records are read-only to the ranking engine. Every engagement field is
//! optional: a missing or malformed value scores as zero instead of failing
//! the record. Only the id is required.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Publication state of a plugin record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginStatus {
    /// Visible on the site and eligible for ranking
    Published,
    /// Not yet published
    #[default]
    Draft,
    /// Any state this crate does not know about
    #[serde(other)]
    Other,
}

/// Repository statistics synced from GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubData {
    #[serde(default, deserialize_with = "lenient")]
    pub stars: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub forks: Option<u64>,
    /// Last push to the repository
    #[serde(default, deserialize_with = "lenient")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Community votes on a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(default, deserialize_with = "lenient")]
    pub upvotes: Option<u64>,
}

/// A comment left on a plugin page. Only its timestamp matters for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A plugin entry from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    /// Opaque identifier; numeric ids from the database are kept as text
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub views: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "resolved_or_absent")]
    pub github_data: Option<GithubData>,
    #[serde(default, deserialize_with = "resolved_or_absent")]
    pub rating: Option<Rating>,
    #[serde(default, deserialize_with = "comments_or_empty")]
    pub comments: Vec<Comment>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub status: PluginStatus,
}

impl PluginRecord {
    /// Create a published record with no engagement data.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: PluginStatus::Published,
            ..Self::default()
        }
    }

    /// Human-readable label: the name when present, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn is_published(&self) -> bool {
        self.status == PluginStatus::Published
    }

    pub fn stars(&self) -> Option<u64> {
        self.github_data.as_ref().and_then(|g| g.stars)
    }

    pub fn forks(&self) -> Option<u64> {
        self.github_data.as_ref().and_then(|g| g.forks)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.github_data.as_ref().and_then(|g| g.last_updated)
    }

    pub fn upvotes(&self) -> Option<u64> {
        self.rating.as_ref().and_then(|r| r.upvotes)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// A value of the wrong shape (`"views": "lots"`, `"createdAt": "yesterday"`,
/// a negative count) reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::debug!("Ignoring malformed plugin field: {}", e);
            Ok(None)
        }
    }
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

/// Comments resolve to objects at depth >= 1. A bare id still counts as a
/// comment, just one without a timestamp.
fn comments_or_empty<'de, D>(deserializer: D) -> Result<Vec<Comment>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(items)) => Ok(items
            .into_iter()
            .map(|item| lenient(item).ok().flatten().unwrap_or_default())
            .collect()),
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(other) => {
            tracing::debug!("Ignoring malformed comments field: {}", other);
            Ok(Vec::new())
        }
    }
}

/// Relationship fields arrive as objects at query depth >= 1 and as bare ids
/// at depth 0. An unresolved reference carries no data, so it reads as absent.
fn resolved_or_absent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(value @ serde_json::Value::Object(_)) => Ok(lenient(value).ok().flatten()),
        _ => Ok(None),
    }
}
