//! Shared test doubles for the engine test modules.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hause_gemini::ContentGenerator;
use hause_memory::{ContextIndex, EmbeddingGenerator, EmbeddingProvider, LocalStore};
use hause_models::Community;
use hause_store::FileCommunityStore;
use hause_telegram::BotMessenger;

/// Records every send and answers with a configurable accept/reject.
pub struct MockMessenger {
    pub sent: Mutex<Vec<(String, String, String)>>,
    accept: AtomicBool,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            accept: AtomicBool::new(true),
        }
    }

    pub fn rejecting() -> Self {
        let messenger = Self::new();
        messenger.accept.store(false, Ordering::SeqCst);
        messenger
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn last_sent(&self) -> Option<(String, String, String)> {
        self.sent.lock().await.last().cloned()
    }
}

#[async_trait]
impl BotMessenger for MockMessenger {
    async fn send(&self, bot_token: &str, chat_id: &str, text: &str) -> bool {
        self.sent.lock().await.push((
            bot_token.to_string(),
            chat_id.to_string(),
            text.to_string(),
        ));
        self.accept.load(Ordering::SeqCst)
    }

    async fn validate(&self, _bot_token: &str) -> bool {
        self.accept.load(Ordering::SeqCst)
    }

    async fn register_webhook(&self, _bot_token: &str, _webhook_url: &str) -> bool {
        self.accept.load(Ordering::SeqCst)
    }
}

/// Generator returning a fixed string for both posts and replies.
pub struct CannedGenerator(pub &'static str);

#[async_trait]
impl ContentGenerator for CannedGenerator {
    async fn generate_reply(
        &self,
        _community: &Community,
        _message: &str,
        _context: &[String],
    ) -> String {
        self.0.to_string()
    }

    async fn generate_post(&self, _community: &Community, _context: &[String]) -> String {
        self.0.to_string()
    }
}

/// Builds a file store and a hash-embedded local memory index in a temp dir.
pub async fn make_stores() -> (tempfile::TempDir, Arc<FileCommunityStore>, ContextIndex) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(FileCommunityStore::new(dir.path()));
    let backend = Arc::new(
        LocalStore::new(dir.path().join("memory"))
            .await
            .unwrap(),
    );
    let embedder = EmbeddingGenerator::new(EmbeddingProvider::HashBased { dimension: 64 });
    let index = ContextIndex::new(backend, embedder);
    (dir, store, index)
}
