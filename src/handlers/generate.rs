use anyhow::Result;
use chrono::{DateTime, Utc};
use teloxide::types::ChatId;
use tracing::{error, info, warn};

use crate::generation::GenerationError;
use crate::state::AppState;

const GENERATING_TEXT: &str = "Generating your image...";
const TIMEOUT_APOLOGY: &str =
    "Sorry, the image generation took too long. Please try again later.";

/// One prompt submission, exclusively owned by its handling task.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub chat_id: ChatId,
    pub prompt: String,
    pub submitted_at: DateTime<Utc>,
}

/// Runs one request through its full lifecycle: send the status message,
/// call the backend once, then either replace the status with the image or
/// edit it into an apology. The status message is always resolved before this
/// returns.
pub async fn generation_handler(state: AppState, request: GenerationRequest) -> Result<()> {
    let status = state
        .delivery
        .send_text(request.chat_id, GENERATING_TEXT)
        .await?;

    let result = match tokio::time::timeout(
        state.config.generation_timeout(),
        state.generation.generate(&request.prompt),
    )
    .await
    {
        Ok(inner) => inner,
        Err(_) => Err(GenerationError::Timeout),
    };

    match result {
        Ok(image) => {
            if let Err(err) = state.delivery.delete_message(&status).await {
                warn!(chat_id = request.chat_id.0, "failed to delete status message: {err}");
            }
            let caption = format!("Prompt: {}", request.prompt);
            state
                .delivery
                .send_photo(request.chat_id, image, &caption)
                .await?;
            info!(
                chat_id = request.chat_id.0,
                elapsed_ms = (Utc::now() - request.submitted_at).num_milliseconds(),
                "image delivered"
            );
        }
        Err(err) => {
            error!(chat_id = request.chat_id.0, "image generation failed: {err}");
            let apology = match &err {
                GenerationError::Timeout => TIMEOUT_APOLOGY.to_string(),
                GenerationError::Backend(reason) => {
                    format!("Sorry, I couldn't generate your image.\n\nError: {reason}")
                }
            };
            if let Err(err) = state.delivery.edit_text(&status, &apology).await {
                warn!(chat_id = request.chat_id.0, "failed to edit status message: {err}");
            }
        }
    }

    Ok(())
}
