//! GitHub traffic API client and report assembly.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::{Credentials, DEFAULT_API_BASE};
use crate::error::TrafficError;
use crate::models::{
    ClonesTraffic, PathEntry, ReferralEntry, RepositoryInfo, RepositoryMetadata, Report,
    ViewsTraffic,
};
use crate::summary::compute_traffic_summary;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("gh-traffic/", env!("CARGO_PKG_VERSION"));

pub const VIEWS_ENDPOINT: &str = "/traffic/views";
pub const CLONES_ENDPOINT: &str = "/traffic/clones";
pub const REFERRERS_ENDPOINT: &str = "/traffic/popular/referrers";
pub const PATHS_ENDPOINT: &str = "/traffic/popular/paths";
pub const REPOSITORY_ENDPOINT: &str = "";

/// Fetches traffic data for one repository and builds a [`Report`] from it.
///
/// Every fetch may come back empty; the report degrades section by section
/// instead of failing as a whole.
#[derive(Debug)]
pub struct TrafficReportBuilder {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl TrafficReportBuilder {
    /// Creates a builder against `https://api.github.com`. No request is made here.
    pub fn new(credentials: Credentials) -> Result<Self, TrafficError> {
        Self::with_api_base(credentials, DEFAULT_API_BASE)
    }

    /// Creates a builder against an alternative API root.
    pub fn with_api_base(credentials: Credentials, api_base: &str) -> Result<Self, TrafficError> {
        let mut auth_value = HeaderValue::from_str(&format!("token {}", credentials.token))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let base_url = format!(
            "{}/repos/{}/{}",
            api_base.trim_end_matches('/'),
            credentials.owner,
            credentials.repo
        );

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// `{api}/repos/{owner}/{repo}`, the prefix of every endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// GETs `{base}{endpoint}` and decodes the JSON body.
    pub async fn try_fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, TrafficError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TrafficError::HttpStatus {
                endpoint: endpoint_label(endpoint).to_string(),
                status,
            });
        }
        Ok(resp.json::<T>().await?)
    }

    /// Like [`try_fetch`](Self::try_fetch), but logs the failure and returns `None`.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        match self.try_fetch(endpoint).await {
            Ok(data) => Some(data),
            Err(e) => {
                error!("Error accessing {}: {}", endpoint_label(endpoint), e);
                None
            }
        }
    }

    /// Daily views over the last 14 days.
    pub async fn views(&self) -> Option<ViewsTraffic> {
        self.fetch(VIEWS_ENDPOINT).await
    }

    /// Daily clones over the last 14 days.
    pub async fn clones(&self) -> Option<ClonesTraffic> {
        self.fetch(CLONES_ENDPOINT).await
    }

    pub async fn referral_sources(&self) -> Option<Vec<ReferralEntry>> {
        self.fetch(REFERRERS_ENDPOINT).await
    }

    pub async fn popular_paths(&self) -> Option<Vec<PathEntry>> {
        self.fetch(PATHS_ENDPOINT).await
    }

    pub async fn repository(&self) -> Option<RepositoryMetadata> {
        self.fetch(REPOSITORY_ENDPOINT).await
    }

    /// Fetches all five sections concurrently and assembles the report.
    ///
    /// With `detailed`, the raw daily series are attached when views were
    /// fetched successfully.
    pub async fn build_report(&self, detailed: bool) -> Report {
        info!(
            "Collecting traffic data for {}/{}",
            self.credentials.owner, self.credentials.repo
        );

        let (views, clones, referrals, paths, repository) = tokio::join!(
            self.views(),
            self.clones(),
            self.referral_sources(),
            self.popular_paths(),
            self.repository(),
        );

        let traffic_summary = compute_traffic_summary(views.as_ref(), clones.as_ref());

        let repository_info = repository.map(RepositoryInfo::from).unwrap_or_else(|| {
            RepositoryInfo::fallback(&self.credentials.owner, &self.credentials.repo)
        });

        let (detailed_views, detailed_clones) = match views {
            Some(views) if detailed => (
                Some(views.views),
                Some(clones.map(|c| c.clones).unwrap_or_default()),
            ),
            _ => (None, None),
        };

        Report {
            repository_info,
            traffic_summary,
            referral_sources: referrals.unwrap_or_default(),
            popular_paths: paths.unwrap_or_default(),
            detailed_views,
            detailed_clones,
        }
    }
}

fn endpoint_label(endpoint: &str) -> &str {
    if endpoint.is_empty() {
        "repository"
    } else {
        endpoint
    }
}
