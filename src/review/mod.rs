pub mod aggregate;
pub mod filter;
pub mod prompt;
pub mod sanitize;

use async_trait::async_trait;
use glob::Pattern;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::diff::{self, DiffError};
use crate::github::event::{ReviewRequest, Trigger};
use crate::github::{HostError, PrLocator, PullRequestDetails};
use crate::llm::CompletionError;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Source-control host collaborator: metadata lookup, diff retrieval for the
/// two trigger kinds, and comment publication. Implementations must be
/// Send + Sync so one instance can serve concurrent webhook invocations.
#[async_trait]
pub trait CodeHost: Send + Sync {
    async fn pull_request(&self, pr: &PrLocator) -> Result<PullRequestDetails, HostError>;

    async fn diff(&self, pr: &PrLocator, trigger: &Trigger) -> Result<String, HostError>;

    async fn publish_comment(&self, pr: &PrLocator, body: &str) -> Result<(), HostError>;
}

/// Text-completion collaborator. Returns the raw model output; sanitizing is
/// the pipeline's job.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// How a single review invocation ended. A completion-call or publish
/// failure is degraded, not surfaced here: the invocation still counts as
/// completed, just without a comment.
#[derive(Debug, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The host returned no diff text for the trigger.
    NoDiff,
    /// The pipeline ran to the end; `commented` says whether a comment was
    /// actually posted.
    Completed { commented: bool },
}

/// Run one review: fetch metadata and diff, parse, filter, aggregate the
/// added lines, build the prompt, ask the model, and post the sanitized
/// answer as a single comment. Strictly sequential; every value is built
/// fresh for this invocation.
#[instrument(
    skip(request, host, model, patterns),
    fields(owner = %request.pr.owner, repo = %request.pr.repo, pr = request.pr.number)
)]
pub async fn run(
    request: &ReviewRequest,
    host: &dyn CodeHost,
    model: &dyn CompletionModel,
    patterns: &[Pattern],
) -> Result<ReviewOutcome, ReviewError> {
    let details = host.pull_request(&request.pr).await?;
    debug!(title = %details.title, "fetched pull request metadata");

    let diff_text = host.diff(&request.pr, &request.trigger).await?;
    if diff_text.trim().is_empty() {
        info!("no diff found");
        return Ok(ReviewOutcome::NoDiff);
    }
    debug!(diff_bytes = diff_text.len(), "fetched diff");

    let files = diff::parse_diff(&diff_text)?;
    let files = filter::apply(files, patterns);
    debug!(files = files.len(), "files retained after exclusion filter");

    let aggregated = aggregate::aggregate(&files);
    if aggregated.is_empty() {
        info!("no added lines to review");
        return Ok(ReviewOutcome::Completed { commented: false });
    }

    let prompt = prompt::build(&aggregated, &details);
    let review = match model.complete(&prompt).await {
        Ok(raw) => sanitize::sanitize(&raw),
        Err(err) => {
            error!(error = %err, "completion request failed");
            String::new()
        }
    };

    if review.is_empty() {
        info!("model produced no review text; skipping comment");
        return Ok(ReviewOutcome::Completed { commented: false });
    }

    match host.publish_comment(&request.pr, &review).await {
        Ok(()) => {
            info!("review comment posted");
            Ok(ReviewOutcome::Completed { commented: true })
        }
        Err(err) => {
            error!(error = %err, "failed to post review comment");
            Ok(ReviewOutcome::Completed { commented: false })
        }
    }
}
