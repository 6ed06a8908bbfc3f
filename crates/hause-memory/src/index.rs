//! High-level context index over a memory backend.
//!
//! [`ContextIndex`] is what the rest of the system talks to: it owns the
//! embedding generator and a backend, composes entry ids, silently skips
//! blank text, and keeps every query scoped to one community.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::embedding::EmbeddingGenerator;
use crate::error::Result;
use crate::memory::{Memory, MemoryKind};
use crate::store::MemoryStore;

/// Similarity-searchable text store keyed by community.
#[derive(Clone)]
pub struct ContextIndex {
    backend: Arc<dyn MemoryStore>,
    embedder: EmbeddingGenerator,
}

impl ContextIndex {
    /// Creates an index over the given backend and embedder.
    pub fn new(backend: Arc<dyn MemoryStore>, embedder: EmbeddingGenerator) -> Self {
        Self { backend, embedder }
    }

    /// Adds a text entry for a community.
    ///
    /// Silently no-ops if the text is empty or whitespace. Fails fast with
    /// [`crate::MemoryError::NotInitialized`] when the null backend is
    /// configured.
    pub async fn add(
        &self,
        community_id: &str,
        entry_id: &str,
        kind: MemoryKind,
        text: &str,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<()> {
        if text.trim().is_empty() {
            debug!(community_id = %community_id, entry_id = %entry_id, "Skipping blank memory entry");
            return Ok(());
        }

        let embedding = self.embedder.embed(text).await?;
        let mut memory = Memory::new(community_id, entry_id, kind, text, embedding);
        memory.metadata = metadata;

        self.backend.store(memory).await
    }

    /// Searches a community's entries by raw query text.
    ///
    /// Returns up to `limit` stored texts, most similar first. Never returns
    /// entries from other communities.
    pub async fn search(
        &self,
        community_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<String>> {
        let embedding = self.embedder.embed(query).await?;
        let results = self.backend.search(&embedding, community_id, limit).await?;
        Ok(results.into_iter().map(|r| r.memory.content).collect())
    }

    /// Counts entries stored for a community.
    pub async fn count(&self, community_id: &str) -> Result<usize> {
        self.backend.count(community_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingProvider;
    use crate::local::LocalStore;
    use crate::store::NullStore;
    use crate::MemoryError;

    async fn make_index() -> (tempfile::TempDir, ContextIndex) {
        let dir = tempfile::TempDir::new().unwrap();
        let backend = Arc::new(LocalStore::new(dir.path().to_path_buf()).await.unwrap());
        let embedder = EmbeddingGenerator::new(EmbeddingProvider::HashBased { dimension: 64 });
        (dir, ContextIndex::new(backend, embedder))
    }

    #[tokio::test]
    async fn test_add_and_search() {
        let (_dir, index) = make_index().await;

        index
            .add(
                "c1",
                "doc-1",
                MemoryKind::Document,
                "reading recommendations for spring",
                HashMap::new(),
            )
            .await
            .unwrap();

        let results = index
            .search("c1", "reading recommendations for spring", 5)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0], "reading recommendations for spring");
    }

    #[tokio::test]
    async fn test_blank_text_is_silent_noop() {
        let (_dir, index) = make_index().await;

        index
            .add("c1", "doc-1", MemoryKind::Document, "   \n", HashMap::new())
            .await
            .unwrap();

        assert_eq!(index.count("c1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_never_crosses_communities() {
        let (_dir, index) = make_index().await;

        index
            .add(
                "community-a",
                "e1",
                MemoryKind::Document,
                "alpha only",
                HashMap::new(),
            )
            .await
            .unwrap();
        index
            .add(
                "community-b",
                "e1",
                MemoryKind::Document,
                "beta only",
                HashMap::new(),
            )
            .await
            .unwrap();

        for query in ["alpha only", "beta only", "anything else"] {
            let results = index.search("community-a", query, 10).await.unwrap();
            assert!(results.iter().all(|text| text == "alpha only"));
        }
    }

    #[tokio::test]
    async fn test_null_backend_rejects_add() {
        let embedder = EmbeddingGenerator::new(EmbeddingProvider::HashBased { dimension: 8 });
        let index = ContextIndex::new(Arc::new(NullStore::new()), embedder);

        let err = index
            .add("c1", "e1", MemoryKind::Config, "some text", HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::NotInitialized));

        // Reads still degrade to empty
        let results = index.search("c1", "anything", 3).await.unwrap();
        assert!(results.is_empty());
    }
}
