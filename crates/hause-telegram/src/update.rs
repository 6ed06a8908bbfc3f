//! Inbound webhook payload types.
//!
//! Mirrors the slice of Telegram's update wire format the responder needs:
//! chat id, message text and sender. Everything else is ignored.

use serde::Deserialize;

/// An inbound webhook update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// The message, if this update carries one.
    pub message: Option<InboundMessage>,
}

/// A chat message delivered through the webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub chat: Chat,
    /// Message text; absent for stickers, photos, joins, etc.
    pub text: Option<String>,
    /// Sender metadata.
    pub from: Option<Sender>,
}

/// The chat a message arrived in.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Message sender metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

impl Update {
    /// Extracts (chat id, text, sender) if this update is a text message.
    pub fn text_message(&self) -> Option<(i64, &str, Option<&Sender>)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref()?;
        Some((message.chat.id, text, message.from.as_ref()))
    }
}
