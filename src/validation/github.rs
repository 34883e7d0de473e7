//! Repository reachability and staleness through the GitHub REST API.

use chrono::{DateTime, Months, Utc};
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::core::constants::{github, http_status};
use crate::core::error::{CheckFailure, Result};

/// What the metadata endpoint told us about one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryStatus {
    pub status_code: u16,
    pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    message: Option<String>,
}

/// Client for `GET /repos/{org}/{repo}`.
///
/// Built once and shared read-only by every check.
#[derive(Debug, Clone)]
pub struct GitHubValidator {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubValidator {
    pub fn new(api_url: &str, token: Option<String>, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Fetch repository metadata.
    ///
    /// Transport failures, undecodable payloads and authentication or
    /// rate-limit rejections (401/403) come back as [`CheckFailure::Api`].
    /// Any other status is returned as-is for [`judge_repository`].
    pub async fn fetch(
        &self,
        org: &str,
        repo: &str,
    ) -> std::result::Result<RepositoryStatus, CheckFailure> {
        let url = format!("{}/repos/{org}/{repo}", self.api_url);
        let mut request = self.client.get(&url).header(ACCEPT, github::ACCEPT);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| CheckFailure::Api(describe(&err)))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response
                .json::<ApiErrorPayload>()
                .await
                .ok()
                .and_then(|payload| payload.message)
                .unwrap_or_default();
            return Err(CheckFailure::Api(
                format!("GET {url}: {} {message}", status.as_u16())
                    .trim_end()
                    .to_string(),
            ));
        }

        if status.as_u16() != http_status::OK {
            return Ok(RepositoryStatus {
                status_code: status.as_u16(),
                pushed_at: None,
            });
        }

        let payload: RepositoryPayload = response
            .json()
            .await
            .map_err(|err| CheckFailure::Api(describe(&err)))?;

        Ok(RepositoryStatus {
            status_code: status.as_u16(),
            pushed_at: payload.pushed_at,
        })
    }

    /// Fetch and judge against the current time.
    pub async fn validate(&self, org: &str, repo: &str) -> std::result::Result<(), CheckFailure> {
        let status = self.fetch(org, repo).await?;
        judge_repository(&status, Utc::now())
    }
}

/// Decide whether a fetched repository passes.
///
/// Stale means `pushed_at + 1 year < now`, using calendar months so leap
/// years land on the right day. A 200 without any push time counts as stale.
pub fn judge_repository(
    status: &RepositoryStatus,
    now: DateTime<Utc>,
) -> std::result::Result<(), CheckFailure> {
    if status.status_code != http_status::OK {
        return Err(CheckFailure::Status(status.status_code));
    }

    let Some(pushed_at) = status.pushed_at else {
        return Err(CheckFailure::Stale);
    };

    match pushed_at.checked_add_months(Months::new(github::STALE_AFTER_MONTHS)) {
        Some(fresh_until) if fresh_until < now => Err(CheckFailure::Stale),
        _ => Ok(()),
    }
}

fn describe(err: &reqwest::Error) -> String {
    std::error::Error::source(err)
        .map(|source| format!("{err}: {source}"))
        .unwrap_or_else(|| err.to_string())
}
