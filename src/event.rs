use chrono::{DateTime, Utc};
use teloxide::types::{ChatId, Update, UpdateKind, User};
use tracing::debug;

/// One normalized inbound message, regardless of which transport carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub chat_id: ChatId,
    pub sender_display_name: String,
    pub kind: EventKind,
    pub raw_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Command { name: String },
    Text { text: String },
}

/// Converts a raw Telegram update into a [`ChatEvent`]. Non-message updates,
/// edits, and messages without text are dropped.
pub fn normalize_update(update: &Update) -> Option<ChatEvent> {
    let UpdateKind::Message(message) = &update.kind else {
        debug!(update_id = update.id.0, "dropping non-message update");
        return None;
    };

    let Some(text) = message.text() else {
        debug!(update_id = update.id.0, "dropping message without text");
        return None;
    };

    let sender_display_name = message
        .from
        .as_ref()
        .map(display_name)
        .unwrap_or_else(|| "unknown".to_string());

    let trimmed = text.trim();
    let kind = match trimmed.strip_prefix('/') {
        Some(rest) => EventKind::Command {
            name: rest
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
        },
        None => EventKind::Text {
            text: trimmed.to_string(),
        },
    };

    Some(ChatEvent {
        chat_id: message.chat.id,
        sender_display_name,
        kind,
        raw_timestamp: message.date,
    })
}

fn display_name(user: &User) -> String {
    match &user.username {
        Some(username) => format!("{} (@{username})", user.first_name),
        None => user.first_name.clone(),
    }
}
