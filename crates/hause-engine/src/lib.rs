//! Per-community content scheduling and generation for PowerHause.
//!
//! This crate is the core of the system: the recurring posting cycle, the
//! shared generation pipeline behind scheduled and "post now" sends, and the
//! reactive webhook responder. Everything else in the workspace is an adapter
//! this crate drives through trait seams ([`hause_store::CommunityStore`],
//! [`hause_memory::ContextIndex`], [`hause_gemini::ContentGenerator`],
//! [`hause_telegram::BotMessenger`]).
//!
//! Failure policy: user-initiated calls surface typed errors; background
//! cycles and webhook handling log and swallow failures, then keep going.

pub mod error;
pub mod mention;
pub mod pipeline;
pub mod responder;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{EngineError, Result};
pub use mention::MentionPolicy;
pub use pipeline::ContentPipeline;
pub use responder::WebhookResponder;
pub use scheduler::PostScheduler;
