//! Application state shared across handlers.

use std::sync::Arc;

use hause_engine::{ContentPipeline, PostScheduler, WebhookResponder};
use hause_gemini::ContentGenerator;
use hause_memory::ContextIndex;
use hause_store::CommunityStore;
use hause_telegram::BotMessenger;

use crate::config::ApiConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Community record store.
    pub store: Arc<dyn CommunityStore>,
    /// Similarity-searchable memory index.
    pub memory: ContextIndex,
    /// Outbound bot messaging.
    pub messenger: Arc<dyn BotMessenger>,
    /// Shared post pipeline.
    pub pipeline: Arc<ContentPipeline>,
    /// Recurring post scheduler.
    pub scheduler: Arc<PostScheduler>,
    /// Webhook reply handling.
    pub responder: Arc<WebhookResponder>,
}

impl AppState {
    /// Wires the engine components over the given dependencies.
    pub fn new(
        config: ApiConfig,
        store: Arc<dyn CommunityStore>,
        memory: ContextIndex,
        generator: Arc<dyn ContentGenerator>,
        messenger: Arc<dyn BotMessenger>,
    ) -> Self {
        let pipeline = Arc::new(ContentPipeline::new(
            store.clone(),
            memory.clone(),
            generator.clone(),
            messenger.clone(),
        ));
        let scheduler = Arc::new(PostScheduler::new(pipeline.clone(), store.clone()));
        let responder = Arc::new(WebhookResponder::new(
            store.clone(),
            memory.clone(),
            generator,
            messenger.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            memory,
            messenger,
            pipeline,
            scheduler,
            responder,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::make_test_state;

    #[tokio::test]
    async fn test_state_starts_with_no_scheduled_tasks() {
        let (_dir, state) = make_test_state().await;
        assert_eq!(state.scheduler.task_count().await, 0);
    }
}
