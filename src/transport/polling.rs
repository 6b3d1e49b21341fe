use std::time::Duration;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::Update;
use tracing::{error, info, warn};

use crate::dispatch::dispatch_event;
use crate::event::normalize_update;
use crate::state::AppState;

// Kept below the Telegram client's own request timeout so a long poll never
// aborts mid-flight.
const POLL_TIMEOUT_SECONDS: u32 = 10;
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-polls `getUpdates` forever. Each update's handling is spawned as its
/// own task so a slow backend call never delays the next poll.
pub async fn run(bot: Bot, state: AppState) -> Result<()> {
    info!("starting long-poll loop");
    let mut offset: Option<i32> = None;

    loop {
        let mut request = bot.get_updates().timeout(POLL_TIMEOUT_SECONDS);
        if let Some(current) = offset {
            request = request.offset(current);
        }

        match request.await {
            Ok(updates) => {
                if let Some(next) = next_offset(&updates) {
                    offset = Some(next);
                }
                for update in &updates {
                    let Some(event) = normalize_update(update) else {
                        continue;
                    };
                    let state = state.clone();
                    tokio::spawn(async move {
                        if let Err(err) = dispatch_event(state, event).await {
                            error!("update handling failed: {err}");
                        }
                    });
                }
            }
            Err(err) => {
                warn!(
                    "getUpdates failed: {err}; retrying in {}s",
                    POLL_RETRY_DELAY.as_secs()
                );
                tokio::time::sleep(POLL_RETRY_DELAY).await;
            }
        }
    }
}

fn next_offset(updates: &[Update]) -> Option<i32> {
    updates
        .iter()
        .map(|update| update.id.0 as i32 + 1)
        .max()
}
