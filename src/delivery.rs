use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, MessageId};

/// Reference to one message the bot has sent, used for later edits/deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Outbound chat operations. Implementations must be stateless and safe to
/// call concurrently from multiple in-flight requests.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;

    async fn send_photo(&self, chat_id: ChatId, image: Vec<u8>, caption: &str)
        -> Result<MessageRef>;

    async fn edit_text(&self, message: &MessageRef, text: &str) -> Result<()>;

    async fn delete_message(&self, message: &MessageRef) -> Result<()>;
}

/// Production delivery client backed by the Telegram Bot API.
pub struct TelegramDelivery {
    bot: Bot,
}

impl TelegramDelivery {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl DeliveryClient for TelegramDelivery {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let message = self.bot.send_message(chat_id, text).await?;
        Ok(MessageRef {
            chat_id,
            message_id: message.id,
        })
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        image: Vec<u8>,
        caption: &str,
    ) -> Result<MessageRef> {
        let message = self
            .bot
            .send_photo(chat_id, InputFile::memory(image))
            .caption(caption.to_string())
            .await?;
        Ok(MessageRef {
            chat_id,
            message_id: message.id,
        })
    }

    async fn edit_text(&self, message: &MessageRef, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(message.chat_id, message.message_id, text)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, message: &MessageRef) -> Result<()> {
        self.bot
            .delete_message(message.chat_id, message.message_id)
            .await?;
        Ok(())
    }
}
