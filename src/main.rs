mod action;
mod config;
mod diff;
mod github;
mod llm;
mod review;
mod server;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use github::GithubClient;
use llm::OpenAiClient;

/// PR Reviewer — posts an AI-generated review as a single comment on a
/// GitHub Pull Request, either as a CI job step or as a webhook service.
#[derive(Parser, Debug)]
#[command(name = "pr-reviewer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Review the pull request described by the CI event file (GITHUB_EVENT_PATH)
    Action,

    /// Serve the GitHub webhook endpoint
    Serve {
        /// Address to bind (e.g. 0.0.0.0:8080)
        #[arg(short, long, default_value = "0.0.0.0:8080")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::Config::load()?;

    match cli.command {
        Command::Action => action::run(&config).await,
        Command::Serve { addr } => {
            let host = GithubClient::new(config.github_token(), &config.github.api_base)?;
            let model = OpenAiClient::new(
                config.openai_api_key(),
                &config.openai.base_url,
                config.openai_model(),
            )?;
            let state = server::AppState {
                host: Arc::new(host),
                model: Arc::new(model),
                exclude: review::filter::parse_patterns(&config.exclude_patterns()),
            };
            server::serve(&addr, state).await
        }
    }
}
