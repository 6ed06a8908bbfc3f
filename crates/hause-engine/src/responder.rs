//! Webhook-driven reply handling.
//!
//! Processes inbound Telegram updates for a community: gate on message
//! shape, community status and mention detection, then generate a reply from
//! memory context and send it back to the originating chat. Every decision
//! works off a single snapshot of the community record loaded at the top of
//! the call, so a concurrent update cannot flip behavior mid-message.
//!
//! This path always answers "handled" to the platform: anything that stops
//! processing resolves to `Ok(None)` rather than an error, because webhook
//! retries would only replay the same message.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use hause_gemini::ContentGenerator;
use hause_memory::{ContextIndex, MemoryKind};
use hause_models::{CommunityId, CommunityStatus};
use hause_store::CommunityStore;
use hause_telegram::{BotMessenger, Update};

use crate::error::Result;
use crate::mention::MentionPolicy;

/// How many memory entries to pull into a reply prompt.
const REPLY_CONTEXT_LIMIT: usize = 3;

/// Generates and sends replies to inbound community messages.
pub struct WebhookResponder {
    store: Arc<dyn CommunityStore>,
    memory: ContextIndex,
    generator: Arc<dyn ContentGenerator>,
    messenger: Arc<dyn BotMessenger>,
    policy: MentionPolicy,
}

impl WebhookResponder {
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
            policy: MentionPolicy::default(),
        }
    }

    /// Replaces the mention policy.
    pub fn with_policy(mut self, policy: MentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Handles one inbound update for the community.
    ///
    /// Returns the reply text if one was generated and sent, `None` if the
    /// update was ignored (no text, unknown or inactive community, or no
    /// mention).
    pub async fn handle_update(&self, id: &CommunityId, update: &Update) -> Result<Option<String>> {
        let Some((chat_id, text, _sender)) = update.text_message() else {
            debug!(community_id = %id, "Update carries no text message, ignoring");
            return Ok(None);
        };

        // One snapshot for the whole update.
        let community = match self.store.find(id).await {
            Ok(community) => community,
            Err(e) => {
                debug!(community_id = %id, error = %e, "No community for webhook, ignoring");
                return Ok(None);
            }
        };

        if community.status != CommunityStatus::Active {
            debug!(community_id = %id, status = ?community.status, "Community not active, ignoring");
            return Ok(None);
        }

        if !self.policy.is_mention(text, community.bot_name.as_deref()) {
            return Ok(None);
        }

        let context = match self
            .memory
            .search(id.as_str(), text, REPLY_CONTEXT_LIMIT)
            .await
        {
            Ok(context) => context,
            Err(e) => {
                warn!(community_id = %id, error = %e, "Memory search failed, replying without context");
                Vec::new()
            }
        };

        let reply = self.generator.generate_reply(&community, text, &context).await;

        let Some(token) = community.bot_token.as_deref() else {
            warn!(community_id = %id, "Active community has no bot token, dropping reply");
            return Ok(None);
        };

        // Reply goes to the chat the message came from, not the configured
        // broadcast chat.
        if !self
            .messenger
            .send(token, &chat_id.to_string(), &reply)
            .await
        {
            warn!(community_id = %id, "Failed to deliver reply");
            return Ok(None);
        }

        info!(community_id = %id, "Replied to mention");

        // Microsecond resolution so back-to-back replies never share an id.
        let entry_id = format!("interaction_{}", Utc::now().timestamp_micros());
        let transcript = format!("User: {}\nAI: {}", text, reply);
        let metadata = HashMap::from([(
            "type".to_string(),
            serde_json::Value::String("interaction".to_string()),
        )]);
        if let Err(e) = self
            .memory
            .add(id.as_str(), &entry_id, MemoryKind::Interaction, &transcript, metadata)
            .await
        {
            warn!(community_id = %id, error = %e, "Failed to store interaction memory");
        }

        Ok(Some(reply))
    }
}
