/// Coordinates of a pull request on the host.
#[derive(Debug, Clone)]
pub struct PrLocator {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

/// Immutable snapshot of the metadata embedded into the review prompt,
/// fetched once per invocation. The description defaults to the empty
/// string when the pull request has no body.
#[derive(Debug, Clone)]
pub struct PullRequestDetails {
    pub title: String,
    pub description: String,
}
