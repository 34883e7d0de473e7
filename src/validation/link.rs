use reqwest::redirect::Policy;

use crate::core::constants::http_status;
use crate::core::error::{CheckFailure, Result};

/// Plain GET checker for every non-repository URL.
///
/// Redirects are never followed: a 3xx is the answer, and it fails.
#[derive(Debug, Clone)]
pub struct LinkValidator {
    client: reqwest::Client,
}

impl LinkValidator {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    pub async fn validate(&self, url: &str) -> std::result::Result<(), CheckFailure> {
        let response = self.client.get(url).send().await.map_err(|err| {
            log::debug!("{url} did not resolve: {err}");
            CheckFailure::Unresolved
        })?;

        judge_status(response.status().as_u16())
    }
}

/// Only a 200 passes.
pub fn judge_status(status_code: u16) -> std::result::Result<(), CheckFailure> {
    if status_code == http_status::OK {
        Ok(())
    } else {
        Err(CheckFailure::Status(status_code))
    }
}
