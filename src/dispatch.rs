use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use crate::event::{ChatEvent, EventKind};
use crate::handlers::{commands, generate};
use crate::handlers::generate::GenerationRequest;
use crate::state::AppState;

const PROMPT_REQUIRED_TEXT: &str =
    "Please send a text prompt describing the image you want.";

/// Routes one normalized event to exactly one handler.
pub async fn dispatch_event(state: AppState, event: ChatEvent) -> Result<()> {
    match &event.kind {
        EventKind::Command { name } if name == "start" => {
            commands::start_handler(&state, &event).await
        }
        EventKind::Command { name } => {
            debug!(command = %name, "ignoring unrecognized command");
            Ok(())
        }
        EventKind::Text { text } => {
            let prompt = text.trim();
            if prompt.is_empty() {
                state
                    .delivery
                    .send_text(event.chat_id, PROMPT_REQUIRED_TEXT)
                    .await?;
                return Ok(());
            }

            info!(
                chat_id = event.chat_id.0,
                sender = %event.sender_display_name,
                sent_at = %event.raw_timestamp,
                "prompt received"
            );
            let request = GenerationRequest {
                chat_id: event.chat_id,
                prompt: prompt.to_string(),
                submitted_at: Utc::now(),
            };
            generate::generation_handler(state, request).await
        }
    }
}
