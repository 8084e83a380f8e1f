use async_trait::async_trait;
use teloxide::payloads::GetUpdatesSetters;
use teloxide::requests::Requester;
use teloxide::types::{AllowedUpdate, ChatId, UpdateKind};
use teloxide::Bot;
use tracing::debug;

use common::{CommandSource, Error, InboundMessage, Notifier, Result};

/// Long-poll window in seconds. Kept well below teloxide's built-in HTTP
/// client timeout so a quiet chat surfaces as an empty batch, not an error.
const LONG_POLL_SECS: u32 = 10;

/// Telegram adapter carrying both directions of the operator channel:
/// outbound notifications and inbound command polling against one chat.
///
/// Transport only. Authorization and command semantics live in the engine;
/// this type just moves text and update ids across the wire.
pub struct TelegramChannel {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChannel {
    pub fn new(token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramChannel {
    async fn send(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.chat_id, text)
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CommandSource for TelegramChannel {
    async fn poll(&self, cursor: Option<i64>) -> Result<Vec<InboundMessage>> {
        let mut request = self
            .bot
            .get_updates()
            .timeout(LONG_POLL_SECS)
            .allowed_updates(vec![AllowedUpdate::Message]);
        if let Some(cursor) = cursor {
            request = request.offset(cursor as i32);
        }

        let updates = request.await.map_err(|e| Error::Transport(e.to_string()))?;
        debug!(count = updates.len(), "Polled Telegram updates");

        Ok(updates
            .into_iter()
            .map(|update| {
                let id = i64::from(update.id);
                match update.kind {
                    UpdateKind::Message(message) => InboundMessage {
                        id,
                        sender: message.chat.id.0,
                        text: message.text().unwrap_or_default().to_owned(),
                    },
                    // Non-message updates still advance the cursor. Sender 0
                    // never matches a real chat id, so the loop drops them.
                    _ => InboundMessage {
                        id,
                        sender: 0,
                        text: String::new(),
                    },
                }
            })
            .collect())
    }
}
