use anyhow::Result;
use tracing::info;

use crate::event::ChatEvent;
use crate::state::AppState;

pub async fn start_handler(state: &AppState, event: &ChatEvent) -> Result<()> {
    info!(sender = %event.sender_display_name, "start command received");
    state
        .delivery
        .send_text(
            event.chat_id,
            &format!(
                "Hi {}! Send me a prompt and I'll generate an image for you.",
                event.sender_display_name
            ),
        )
        .await?;
    Ok(())
}
