//! Telegram Bot API client for PowerHause.
//!
//! Unlike a single-bot deployment, PowerHause manages one bot credential per
//! community, so this crate is a stateless request/response wrapper over the
//! Bot HTTP API rather than a long-polling dispatcher. Send and validate
//! report plain booleans; transport errors are swallowed into `false` by
//! contract.

pub mod messenger;
pub mod update;

pub use messenger::{webhook_url, BotMessenger, TelegramMessenger};
pub use update::{Chat, InboundMessage, Sender, Update};
