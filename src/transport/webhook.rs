use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use teloxide::types::Update;
use tracing::{debug, error, info};

use crate::dispatch::dispatch_event;
use crate::event::normalize_update;
use crate::state::AppState;

/// Serves the webhook receiver plus a liveness probe.
pub async fn run(state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    info!("webhook server listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/webhook", post(receive_update))
        .with_state(state)
}

async fn liveness() -> &'static str {
    "Bot is running"
}

/// Acknowledges receipt with a fixed body regardless of downstream outcome;
/// the update's handling is spawned so a slow backend never stalls Telegram's
/// delivery.
async fn receive_update(
    State(state): State<AppState>,
    body: Result<Json<Update>, JsonRejection>,
) -> (StatusCode, &'static str) {
    let update = match body {
        Ok(Json(update)) => update,
        Err(err) => {
            debug!("dropping malformed webhook payload: {err}");
            return (StatusCode::OK, "ok");
        }
    };

    if let Some(event) = normalize_update(&update) {
        tokio::spawn(async move {
            if let Err(err) = dispatch_event(state, event).await {
                error!("update handling failed: {err}");
            }
        });
    }

    (StatusCode::OK, "ok")
}
