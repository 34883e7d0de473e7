use async_trait::async_trait;

use crate::config::Config;
use crate::core::error::{CheckFailure, Result};
use crate::validation::classifier::Target;
use crate::validation::github::GitHubValidator;
use crate::validation::link::LinkValidator;

/// The network side of a check.
///
/// Implementations are shared by every concurrent check, so they must be
/// usable through `&self` from many tasks at once.
#[async_trait]
pub trait ValidateReference: Send + Sync {
    async fn validate_repository(&self, org: &str, repo: &str)
    -> std::result::Result<(), CheckFailure>;

    async fn validate_link(&self, url: &str) -> std::result::Result<(), CheckFailure>;

    async fn validate_target(&self, target: &Target<'_>) -> std::result::Result<(), CheckFailure> {
        match *target {
            Target::Repository { org, repo } => self.validate_repository(org, repo).await,
            Target::Link(url) => self.validate_link(url).await,
        }
    }
}

/// Production validator: GitHub API for repositories, GET for the rest.
#[derive(Debug, Clone)]
pub struct Validator {
    github: GitHubValidator,
    links: LinkValidator,
}

impl Validator {
    pub fn new(github: GitHubValidator, links: LinkValidator) -> Self {
        Self { github, links }
    }

    /// Build both clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.resolve_github_token();
        if token.is_none() {
            log::warn!(
                "No GitHub token configured; repository checks are unauthenticated and heavily rate limited"
            );
        }

        let github = GitHubValidator::new(config.github_api_url(), token, config.user_agent())?;
        let links = LinkValidator::new(config.user_agent())?;
        Ok(Self::new(github, links))
    }
}

#[async_trait]
impl ValidateReference for Validator {
    async fn validate_repository(
        &self,
        org: &str,
        repo: &str,
    ) -> std::result::Result<(), CheckFailure> {
        self.github.validate(org, repo).await
    }

    async fn validate_link(&self, url: &str) -> std::result::Result<(), CheckFailure> {
        self.links.validate(url).await
    }
}
