use std::env;
use std::fs;
use std::path::Path;

use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::github::event::{self, Event, ReviewRequest};
use crate::github::GithubClient;
use crate::llm::OpenAiClient;
use crate::review::{self, filter, ReviewOutcome};

/// Run one review pass from the CI event file. Absence of the event file or
/// an unsupported trigger is a successful no-op, matching how a skipped job
/// step should behave; real faults propagate and fail the step.
pub async fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let Some(event_path) = env::var_os("GITHUB_EVENT_PATH") else {
        info!("GITHUB_EVENT_PATH is not set; nothing to review");
        return Ok(());
    };
    let Some(raw) = read_event(Path::new(&event_path)) else {
        return Ok(());
    };

    match event::parse_event(&raw)? {
        Event::Unsupported { action } => {
            info!(%action, "unsupported event action; skipping review");
            println!(
                "{} unsupported event action `{}`; no review performed",
                "skipped:".yellow().bold(),
                action
            );
            Ok(())
        }
        Event::Review(request) => {
            let host = GithubClient::new(config.github_token(), &config.github.api_base)?;
            let model = OpenAiClient::new(
                config.openai_api_key(),
                &config.openai.base_url,
                config.openai_model(),
            )?;
            let patterns = filter::parse_patterns(&config.exclude_patterns());

            let outcome = review::run(&request, &host, &model, &patterns).await?;
            print_outcome(&request, &outcome);
            Ok(())
        }
    }
}

fn read_event(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) => {
            info!(path = %path.display(), error = %err, "event file not readable; nothing to review");
            None
        }
    }
}

fn print_outcome(request: &ReviewRequest, outcome: &ReviewOutcome) {
    match outcome {
        ReviewOutcome::NoDiff => println!(
            "{} no diff found for PR #{}",
            "skipped:".yellow().bold(),
            request.pr.number
        ),
        ReviewOutcome::Completed { commented: true } => println!(
            "{} review comment posted to PR #{}",
            "done:".green().bold(),
            request.pr.number
        ),
        ReviewOutcome::Completed { commented: false } => println!(
            "{} review completed without a comment for PR #{}",
            "done:".green().bold(),
            request.pr.number
        ),
    }
}
