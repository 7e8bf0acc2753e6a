//! Data models for GitHub traffic responses and the assembled report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One calendar day of views or clones.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DailyTrafficPoint {
    pub timestamp: DateTime<Utc>,
    pub count: u64,
    pub uniques: u64,
}

/// Response of `GET /repos/{owner}/{repo}/traffic/views`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ViewsTraffic {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub uniques: u64,
    #[serde(default)]
    pub views: Vec<DailyTrafficPoint>,
}

/// Response of `GET /repos/{owner}/{repo}/traffic/clones`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ClonesTraffic {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub uniques: u64,
    #[serde(default)]
    pub clones: Vec<DailyTrafficPoint>,
}

/// An external site that sent visitors to the repository.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReferralEntry {
    pub referrer: String,
    pub count: u64,
    pub uniques: u64,
}

/// A file or directory of the repository ranked by views.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub path: String,
    #[serde(default)]
    pub title: String,
    pub count: u64,
    pub uniques: u64,
}

/// The subset of `GET /repos/{owner}/{repo}` the report uses.
#[derive(Debug, Deserialize, Clone)]
pub struct RepositoryMetadata {
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
}

/// Repository section of the report.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
}

impl RepositoryInfo {
    /// Placeholder used when the repository metadata could not be fetched.
    pub fn fallback(owner: &str, repo: &str) -> Self {
        Self {
            name: format!("{owner}/{repo}"),
            description: None,
            stars: 0,
            forks: 0,
            watchers: 0,
        }
    }
}

impl From<RepositoryMetadata> for RepositoryInfo {
    fn from(meta: RepositoryMetadata) -> Self {
        Self {
            name: meta.full_name,
            description: meta.description,
            stars: meta.stargazers_count,
            forks: meta.forks_count,
            watchers: meta.watchers_count,
        }
    }
}

/// Aggregates computed over the traffic window.
///
/// The default value is the empty summary reported when views or clones
/// could not be fetched.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TrafficSummary {
    pub total_views: u64,
    pub total_unique_visitors: u64,
    pub total_clones: u64,
    pub total_unique_cloners: u64,
    pub average_daily_views: f64,
    pub average_daily_clones: f64,
    /// Serialized as `{}` when the series is empty.
    #[serde(default, with = "empty_object_as_none")]
    pub peak_views_day: Option<DailyTrafficPoint>,
    #[serde(default, with = "empty_object_as_none")]
    pub peak_clones_day: Option<DailyTrafficPoint>,
    pub analysis_period_days: usize,
}

/// Full traffic report, serialized verbatim into the output file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Report {
    pub repository_info: RepositoryInfo,
    pub traffic_summary: TrafficSummary,
    pub referral_sources: Vec<ReferralEntry>,
    pub popular_paths: Vec<PathEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_views: Option<Vec<DailyTrafficPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_clones: Option<Vec<DailyTrafficPoint>>,
}

mod empty_object_as_none {
    use serde::de::DeserializeOwned;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let opt: Option<Value> = Option::deserialize(deserializer)?;
        match opt {
            None => Ok(None),
            Some(Value::Object(map)) if map.is_empty() => Ok(None),
            Some(v) => serde_json::from_value(v)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
