//! Content generator trait and the Gemini-backed implementation.

use async_trait::async_trait;
use tracing::warn;

use hause_models::Community;

use crate::client::GeminiClient;
use crate::prompt;

/// Fallback reply when the model call fails.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I'm having trouble processing that right now. Please try again.";

/// Fallback reply when no model is configured at all.
pub const FALLBACK_REPLY_UNCONFIGURED: &str = "I'm here to help!";

/// Fallback post when the model call fails.
pub const FALLBACK_POST: &str =
    "Hello everyone! Hope you're having a great day. Let's keep the conversation going! 🚀";

/// Fallback post when no model is configured at all.
pub const FALLBACK_POST_UNCONFIGURED: &str =
    "Community update: Stay engaged and keep the conversation going!";

/// Produces community content from configuration and context.
///
/// Implementations never return errors: a failed or unavailable model yields
/// a deterministic, non-empty fallback string.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates a reply to an inbound message.
    async fn generate_reply(
        &self,
        community: &Community,
        message: &str,
        context: &[String],
    ) -> String;

    /// Generates a standalone community post.
    async fn generate_post(&self, community: &Community, context: &[String]) -> String;
}

/// Gemini-backed generator.
///
/// Constructed with `None` when no API key is configured; that is the
/// explicit degraded mode, not an error.
pub struct GeminiGenerator {
    client: Option<GeminiClient>,
}

impl GeminiGenerator {
    /// Creates a generator over an optional client.
    pub fn new(client: Option<GeminiClient>) -> Self {
        if client.is_none() {
            warn!("Gemini API key not configured, generation will use fallback messages");
        }
        Self { client }
    }

    /// Creates a generator from `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self::new(GeminiClient::from_env())
    }

    /// Whether a real model backs this generator.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate_reply(
        &self,
        community: &Community,
        message: &str,
        context: &[String],
    ) -> String {
        let Some(client) = &self.client else {
            return FALLBACK_REPLY_UNCONFIGURED.to_string();
        };

        let prompt = prompt::reply_prompt(community, message, context);
        match client.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(community_id = %community.id, error = %e, "Reply generation failed, using fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn generate_post(&self, community: &Community, context: &[String]) -> String {
        let Some(client) = &self.client else {
            return FALLBACK_POST_UNCONFIGURED.to_string();
        };

        let prompt = prompt::post_prompt(community, context);
        match client.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(community_id = %community.id, error = %e, "Post generation failed, using fallback");
                FALLBACK_POST.to_string()
            }
        }
    }
}
