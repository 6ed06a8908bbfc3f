//! Shared post-generation pipeline.
//!
//! One code path produces and delivers a community post, whether the trigger
//! is a scheduler tick or an operator's "post now" request. The path is:
//! load the record, gather memory context, generate content, send, then
//! append to the post log. Memory and post-log failures degrade with a
//! warning; a missing record, missing credentials or a rejected send surface
//! as typed errors to the caller.

use std::sync::Arc;

use tracing::{info, warn};

use hause_gemini::{prompt, ContentGenerator};
use hause_memory::ContextIndex;
use hause_models::{CommunityId, PostLogEntry, PostOrigin};
use hause_store::{CommunityStore, StoreError};
use hause_telegram::BotMessenger;

use crate::error::{EngineError, Result};

/// How many memory entries to pull into a post prompt.
const POST_CONTEXT_LIMIT: usize = 5;

/// Generates and delivers posts for a community.
pub struct ContentPipeline {
    store: Arc<dyn CommunityStore>,
    memory: ContextIndex,
    generator: Arc<dyn ContentGenerator>,
    messenger: Arc<dyn BotMessenger>,
}

impl ContentPipeline {
    pub fn new(
        store: Arc<dyn CommunityStore>,
        memory: ContextIndex,
        generator: Arc<dyn ContentGenerator>,
        messenger: Arc<dyn BotMessenger>,
    ) -> Self {
        Self {
            store,
            memory,
            generator,
            messenger,
        }
    }

    /// Generates one post for the community and sends it immediately.
    ///
    /// Returns the content that was sent. The `origin` is recorded in the
    /// post log so scheduled and operator-triggered posts stay
    /// distinguishable.
    ///
    /// # Errors
    /// - [`EngineError::NotFound`] if the community does not exist.
    /// - [`EngineError::NotConnected`] if bot token or chat id are missing.
    /// - [`EngineError::SendFailed`] if the platform rejected the send.
    pub async fn post_now(&self, id: &CommunityId, origin: PostOrigin) -> Result<String> {
        let community = self.store.find(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => EngineError::NotFound(id.to_string()),
            other => EngineError::Store(other),
        })?;

        let query = prompt::post_context_query(&community);
        let context = match self.memory.search(id.as_str(), &query, POST_CONTEXT_LIMIT).await {
            Ok(context) => context,
            Err(e) => {
                warn!(community_id = %id, error = %e, "Memory search failed, generating without context");
                Vec::new()
            }
        };

        let content = self.generator.generate_post(&community, &context).await;

        let (token, chat_id) = community
            .credentials()
            .ok_or_else(|| EngineError::NotConnected(id.to_string()))?;

        if !self.messenger.send(token, chat_id, &content).await {
            return Err(EngineError::SendFailed(id.to_string()));
        }

        info!(community_id = %id, origin = ?origin, "Posted to community");

        // The message is already out, so a log failure is not worth an error.
        if let Err(e) = self
            .store
            .append_post(id, PostLogEntry::new(content.clone(), origin))
            .await
        {
            warn!(community_id = %id, error = %e, "Failed to record post in log");
        }

        Ok(content)
    }
}
