use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use glob::Pattern;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use crate::github::event::{self, Event, EventError};
use crate::review::{self, CodeHost, CompletionModel, ReviewError, ReviewOutcome};

#[derive(Debug, Error)]
enum WebhookError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Shared collaborators for the webhook entry point, behind the pipeline's
/// trait seams.
pub struct AppState {
    pub host: Arc<dyn CodeHost>,
    pub model: Arc<dyn CompletionModel>,
    pub exclude: Vec<Pattern>,
}

/// Serve the webhook endpoint until ctrl-c.
pub async fn serve(addr: &str, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "webhook server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .with_state(state)
}

async fn handle_webhook(State(state): State<Arc<AppState>>, body: String) -> Response {
    match process(&state, &body).await {
        Ok(message) => (StatusCode::OK, Json(json!({ "message": message }))).into_response(),
        Err(err) => {
            error!(error = %err, "error processing webhook");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "error processing webhook",
                    "error": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

async fn process(state: &AppState, body: &str) -> Result<&'static str, WebhookError> {
    match event::parse_event(body)? {
        Event::Unsupported { action } => {
            info!(%action, "unsupported event type");
            Ok("unsupported event type")
        }
        Event::Review(request) => {
            let outcome = review::run(
                &request,
                state.host.as_ref(),
                state.model.as_ref(),
                &state.exclude,
            )
            .await?;
            match outcome {
                ReviewOutcome::NoDiff => Ok("no diff found"),
                ReviewOutcome::Completed { .. } => Ok("review completed successfully"),
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
