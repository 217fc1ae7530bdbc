use crate::ports::outbound::{RepositoryMetadata, RepositoryMetadataRepository};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Contributors needed before the bus factor stops adding risk
const CONTRIBUTOR_SAMPLE: usize = 3;

#[derive(Debug, Deserialize)]
struct GitHubRepository {
    #[serde(default)]
    stargazers_count: Option<u64>,
    #[serde(default)]
    pushed_at: Option<DateTime<Utc>>,
}

/// GitHubRepositoryClient adapter for community metadata
///
/// Reads stars and last push from `GET /repos/{owner}/{repo}` and samples
/// the contributor list for the bus factor. Uses `GITHUB_TOKEN` when set
/// to lift the anonymous rate limit.
pub struct GitHubRepositoryClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubRepositoryClient {
    pub fn new() -> Result<Self> {
        Self::with_api_url(DEFAULT_API_URL, std::env::var("GITHUB_TOKEN").ok())
    }

    pub fn with_api_url(api_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(format!("pypi-risk-graph/{}", version))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            anyhow::bail!("GitHub API returned status code {}", response.status());
        }
        Ok(response.json().await?)
    }
}

/// Extracts `(owner, repo)` from a GitHub URL
///
/// Accepts `https://github.com/owner/repo`, with or without `www.`,
/// a `.git` suffix, trailing path segments or a trailing slash.
pub fn parse_github_repo(url: &str) -> Option<(String, String)> {
    let rest = url
        .trim()
        .trim_start_matches("git+")
        .split_once("://")
        .map_or(url.trim(), |(_, rest)| rest);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let path = rest.strip_prefix("github.com/")?;

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    let valid = |s: &str| {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if !valid(owner) || !valid(repo) {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

#[async_trait]
impl RepositoryMetadataRepository for GitHubRepositoryClient {
    async fn lookup(&self, repo_ref: &str) -> Result<RepositoryMetadata> {
        let (owner, repo) = parse_github_repo(repo_ref)
            .ok_or_else(|| anyhow::anyhow!("not a GitHub repository: {}", repo_ref))?;

        let repo_url = format!("{}/repos/{}/{}", self.api_url, owner, repo);
        let repository: GitHubRepository = self.get(&repo_url).await?;

        let contributors_url = format!("{}/contributors?per_page={}", repo_url, CONTRIBUTOR_SAMPLE);
        let maintainers = match self.get::<Vec<serde_json::Value>>(&contributors_url).await {
            Ok(list) => Some(list.len() as u32),
            Err(e) => {
                debug!(repo = %repo_url, error = %e, "contributor lookup failed");
                None
            }
        };

        Ok(RepositoryMetadata {
            stars: repository.stargazers_count,
            downloads: None,
            maintainers,
            last_update: repository.pushed_at,
        })
    }
}
