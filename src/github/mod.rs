pub mod event;
pub mod types;

pub use types::{PrLocator, PullRequestDetails};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::review::CodeHost;
use event::Trigger;

const USER_AGENT: &str = "pr-reviewer";

#[derive(Debug, Error)]
pub enum HostError {
    #[error("GitHub API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("GitHub token not found in config or environment")]
    MissingToken,
}

/// Thin GitHub REST client. One instance per invocation (CI) or one shared
/// instance behind the webhook server; it holds no per-request state.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GithubClient {
    pub fn new(token: Option<String>, api_base: &str) -> Result<Self, HostError> {
        let token = token.ok_or(HostError::MissingToken)?;
        Ok(Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn pull_url(&self, pr: &PrLocator) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_base, pr.owner, pr.repo, pr.number
        )
    }

    async fn fetch_diff_text(&self, url: &str, accept: &str) -> Result<String, HostError> {
        let diff = self
            .http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", accept)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(diff_bytes = diff.len(), "received diff");
        Ok(diff)
    }
}

#[async_trait]
impl CodeHost for GithubClient {
    #[instrument(skip(self), fields(owner = %pr.owner, repo = %pr.repo, pr = pr.number))]
    async fn pull_request(&self, pr: &PrLocator) -> Result<PullRequestDetails, HostError> {
        #[derive(Deserialize)]
        struct PullResponse {
            title: Option<String>,
            body: Option<String>,
        }

        debug!("fetching PR metadata from GitHub API");
        let metadata = self
            .http
            .get(self.pull_url(pr))
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<PullResponse>()
            .await?;

        Ok(PullRequestDetails {
            title: metadata.title.unwrap_or_default(),
            description: metadata.body.unwrap_or_default(),
        })
    }

    #[instrument(skip(self, trigger), fields(owner = %pr.owner, repo = %pr.repo, pr = pr.number))]
    async fn diff(&self, pr: &PrLocator, trigger: &Trigger) -> Result<String, HostError> {
        match trigger {
            Trigger::Opened => {
                debug!("fetching full pull request diff");
                self.fetch_diff_text(&self.pull_url(pr), "application/vnd.github.diff")
                    .await
            }
            Trigger::Synchronize { before, after } => {
                debug!(%before, %after, "fetching diff between pushed commits");
                let url = format!(
                    "{}/repos/{}/{}/compare/{}...{}",
                    self.api_base, pr.owner, pr.repo, before, after
                );
                self.fetch_diff_text(&url, "application/vnd.github.v3.diff")
                    .await
            }
        }
    }

    #[instrument(skip(self, body), fields(owner = %pr.owner, repo = %pr.repo, pr = pr.number))]
    async fn publish_comment(&self, pr: &PrLocator, body: &str) -> Result<(), HostError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base, pr.owner, pr.repo, pr.number
        );
        self.http
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?
            .error_for_status()?;
        debug!("issue comment created");
        Ok(())
    }
}
