pub mod polling;
pub mod webhook;

use anyhow::Result;
use teloxide::Bot;

use crate::config::TransportMode;
use crate::state::AppState;

/// Runs the ingestion front-end selected at startup. The two modes are
/// mutually exclusive alternatives feeding the same normalize/dispatch chain.
pub async fn run(bot: Bot, state: AppState) -> Result<()> {
    match state.config.transport_mode {
        TransportMode::Polling => polling::run(bot, state).await,
        TransportMode::Webhook => webhook::run(state).await,
    }
}
