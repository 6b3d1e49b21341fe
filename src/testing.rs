//! In-memory capability implementations shared by the unit tests.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use teloxide::types::{ChatId, MessageId};

use crate::config::{Config, TransportMode};
use crate::delivery::{DeliveryClient, MessageRef};
use crate::event::{ChatEvent, EventKind};
use crate::generation::{GenerationClient, GenerationError};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryCall {
    Text {
        chat_id: ChatId,
        text: String,
    },
    Photo {
        chat_id: ChatId,
        caption: String,
        byte_len: usize,
    },
    Edit {
        message: MessageRef,
        text: String,
    },
    Delete {
        message: MessageRef,
    },
}

impl DeliveryCall {
    pub fn chat_id(&self) -> ChatId {
        match self {
            DeliveryCall::Text { chat_id, .. } | DeliveryCall::Photo { chat_id, .. } => *chat_id,
            DeliveryCall::Edit { message, .. } | DeliveryCall::Delete { message } => {
                message.chat_id
            }
        }
    }
}

/// Records every outbound operation and hands out sequential message ids.
#[derive(Default)]
pub struct RecordingDelivery {
    calls: Mutex<Vec<DeliveryCall>>,
    sent_refs: Mutex<Vec<MessageRef>>,
    next_message_id: AtomicI32,
}

impl RecordingDelivery {
    pub fn calls(&self) -> Vec<DeliveryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_refs(&self) -> Vec<MessageRef> {
        self.sent_refs.lock().unwrap().clone()
    }

    fn next_ref(&self, chat_id: ChatId) -> MessageRef {
        let message_ref = MessageRef {
            chat_id,
            message_id: MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1),
        };
        self.sent_refs.lock().unwrap().push(message_ref);
        message_ref
    }
}

#[async_trait]
impl DeliveryClient for RecordingDelivery {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> anyhow::Result<MessageRef> {
        self.calls.lock().unwrap().push(DeliveryCall::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(self.next_ref(chat_id))
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: Vec<u8>,
        caption: &str,
    ) -> anyhow::Result<MessageRef> {
        self.calls.lock().unwrap().push(DeliveryCall::Photo {
            chat_id,
            caption: caption.to_string(),
            byte_len: image.len(),
        });
        Ok(self.next_ref(chat_id))
    }

    async fn edit_text(&self, message: &MessageRef, text: &str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(DeliveryCall::Edit {
            message: *message,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, message: &MessageRef) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(DeliveryCall::Delete { message: *message });
        Ok(())
    }
}

pub enum GenerationBehavior {
    Succeed(Vec<u8>),
    Fail(String),
    /// Never resolves; exercises the orchestrator's timeout bound.
    Hang,
}

pub struct MockGeneration {
    behavior: GenerationBehavior,
    prompts: Mutex<Vec<String>>,
}

impl MockGeneration {
    pub fn new(behavior: GenerationBehavior) -> Self {
        Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for MockGeneration {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.behavior {
            GenerationBehavior::Succeed(bytes) => Ok(bytes.clone()),
            GenerationBehavior::Fail(reason) => Err(GenerationError::Backend(reason.clone())),
            GenerationBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

pub fn test_config() -> Config {
    Config {
        bot_token: "test-token".to_string(),
        image_api_url: "http://localhost/unused".to_string(),
        image_api_token: "test-api-token".to_string(),
        transport_mode: TransportMode::Polling,
        port: 0,
        generation_timeout_seconds: 30,
        log_level: "off".to_string(),
    }
}

pub fn mock_state(
    behavior: GenerationBehavior,
) -> (AppState, Arc<RecordingDelivery>, Arc<MockGeneration>) {
    let delivery = Arc::new(RecordingDelivery::default());
    let generation = Arc::new(MockGeneration::new(behavior));
    let state = AppState::new(test_config(), delivery.clone(), generation.clone());
    (state, delivery, generation)
}

pub fn event_with(chat_id: ChatId, kind: EventKind) -> ChatEvent {
    ChatEvent {
        chat_id,
        sender_display_name: "Ada (@ada)".to_string(),
        kind,
        raw_timestamp: Utc::now(),
    }
}

pub fn update_from_json(value: serde_json::Value) -> teloxide::types::Update {
    // Round-trip through a string: teloxide's custom `Update` deserializer
    // relies on borrowed map keys, which `serde_json::from_value` cannot
    // provide, silently yielding `UpdateKind::Error`.
    serde_json::from_str(&value.to_string()).expect("valid update json")
}
