use serde::Deserialize;
use thiserror::Error;

use super::types::PrLocator;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to parse event payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("event payload is missing {0}")]
    MissingField(&'static str),
}

/// What kind of pull-request activity triggered this invocation. Only these
/// two kinds carry enough information to retrieve a diff; everything else is
/// rejected at the boundary as `Event::Unsupported`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The pull request was opened; review its full current diff.
    Opened,
    /// New commits were pushed; review the diff between the two references.
    Synchronize { before: String, after: String },
}

/// A fully validated review trigger: which pull request, and how to fetch
/// its diff.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub pr: PrLocator,
    pub trigger: Trigger,
}

#[derive(Debug)]
pub enum Event {
    Review(ReviewRequest),
    Unsupported { action: String },
}

#[derive(Deserialize)]
struct EventPayload {
    action: Option<String>,
    number: Option<u64>,
    before: Option<String>,
    after: Option<String>,
    repository: Option<RepositoryPayload>,
    pull_request: Option<PullRequestPayload>,
}

#[derive(Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Deserialize)]
struct OwnerPayload {
    login: String,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    number: u64,
}

/// Parse a raw webhook body or CI event file into a typed event.
///
/// The pull request number is taken from `pull_request.number`, falling back
/// to the top-level `number` the Actions payload carries. Unrecognized
/// actions parse successfully as `Event::Unsupported`; structurally broken
/// payloads are errors.
pub fn parse_event(raw: &str) -> Result<Event, EventError> {
    let payload: EventPayload = serde_json::from_str(raw)?;
    let action = payload.action.unwrap_or_default();

    let trigger = match action.as_str() {
        "opened" => Trigger::Opened,
        "synchronize" => Trigger::Synchronize {
            before: payload.before.ok_or(EventError::MissingField("before"))?,
            after: payload.after.ok_or(EventError::MissingField("after"))?,
        },
        _ => return Ok(Event::Unsupported { action }),
    };

    let repository = payload
        .repository
        .ok_or(EventError::MissingField("repository"))?;
    let number = payload
        .pull_request
        .map(|pr| pr.number)
        .or(payload.number)
        .ok_or(EventError::MissingField("pull request number"))?;

    Ok(Event::Review(ReviewRequest {
        pr: PrLocator {
            owner: repository.owner.login,
            repo: repository.name,
            number,
        },
        trigger,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_opened_event() {
        let raw = r#"{
            "action": "opened",
            "number": 7,
            "repository": {"name": "repo", "owner": {"login": "org"}},
            "pull_request": {"number": 7, "title": "t", "body": null}
        }"#;
        let Event::Review(request) = parse_event(raw).unwrap() else {
            panic!("expected a review request");
        };
        assert_eq!(request.pr.owner, "org");
        assert_eq!(request.pr.repo, "repo");
        assert_eq!(request.pr.number, 7);
        assert_eq!(request.trigger, Trigger::Opened);
    }

    #[test]
    fn test_parse_synchronize_event() {
        let raw = r#"{
            "action": "synchronize",
            "before": "abc123",
            "after": "def456",
            "repository": {"name": "repo", "owner": {"login": "org"}},
            "pull_request": {"number": 3}
        }"#;
        let Event::Review(request) = parse_event(raw).unwrap() else {
            panic!("expected a review request");
        };
        assert_eq!(
            request.trigger,
            Trigger::Synchronize {
                before: "abc123".to_string(),
                after: "def456".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_closed_event_is_unsupported() {
        let raw = r#"{"action": "closed", "number": 1}"#;
        let Event::Unsupported { action } = parse_event(raw).unwrap() else {
            panic!("expected unsupported");
        };
        assert_eq!(action, "closed");
    }

    #[test]
    fn test_missing_action_is_unsupported() {
        let Event::Unsupported { action } = parse_event("{}").unwrap() else {
            panic!("expected unsupported");
        };
        assert_eq!(action, "");
    }

    #[test]
    fn test_number_falls_back_to_top_level() {
        let raw = r#"{
            "action": "opened",
            "number": 12,
            "repository": {"name": "repo", "owner": {"login": "org"}}
        }"#;
        let Event::Review(request) = parse_event(raw).unwrap() else {
            panic!("expected a review request");
        };
        assert_eq!(request.pr.number, 12);
    }

    #[test]
    fn test_synchronize_without_refs_is_an_error() {
        let raw = r#"{
            "action": "synchronize",
            "repository": {"name": "repo", "owner": {"login": "org"}},
            "pull_request": {"number": 3}
        }"#;
        assert!(parse_event(raw).is_err());
    }

    #[test]
    fn test_missing_repository_is_an_error() {
        let raw = r#"{"action": "opened", "number": 1}"#;
        assert!(parse_event(raw).is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_event("not json").is_err());
    }
}
