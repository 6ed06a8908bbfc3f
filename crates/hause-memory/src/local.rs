//! Local file-based memory store for development and testing.
//!
//! A simple implementation of the [`MemoryStore`] trait that persists entries
//! to a JSON file and uses brute-force cosine similarity search. Suitable for
//! small collections; use the Qdrant backend for anything larger.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::embedding::cosine_similarity;
use crate::error::{MemoryError, Result};
use crate::memory::{Memory, SearchResult};
use crate::store::MemoryStore;

/// Local file-based memory store.
pub struct LocalStore {
    /// Path to the storage directory.
    storage_dir: PathBuf,
    /// In-memory cache of all entries, keyed by id.
    memories: RwLock<HashMap<String, Memory>>,
}

impl LocalStore {
    /// Creates a new local store at the specified path.
    pub async fn new(storage_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&storage_dir)?;

        let store = Self {
            storage_dir,
            memories: RwLock::new(HashMap::new()),
        };

        store.load().await?;
        Ok(store)
    }

    fn data_file(&self) -> PathBuf {
        self.storage_dir.join("memories.json")
    }

    async fn load(&self) -> Result<()> {
        let file = self.data_file();
        if !file.exists() {
            debug!(path = %file.display(), "No existing memories file");
            return Ok(());
        }

        let data = std::fs::read_to_string(&file)?;
        let memories: Vec<Memory> =
            serde_json::from_str(&data).map_err(MemoryError::SerializationError)?;

        let mut store = self.memories.write().await;
        for memory in memories {
            store.insert(memory.id.clone(), memory);
        }

        info!(count = store.len(), "Loaded memories from disk");
        Ok(())
    }

    async fn save(&self) -> Result<()> {
        let memories = self.memories.read().await;
        let data: Vec<&Memory> = memories.values().collect();
        let json = serde_json::to_string_pretty(&data)?;

        // Atomic write via temp file
        let file = self.data_file();
        let temp_file = file.with_extension("json.tmp");
        std::fs::write(&temp_file, json)?;
        std::fs::rename(&temp_file, &file)?;

        debug!(count = memories.len(), "Saved memories to disk");
        Ok(())
    }
}

#[async_trait]
impl MemoryStore for LocalStore {
    async fn store(&self, memory: Memory) -> Result<()> {
        {
            let mut memories = self.memories.write().await;
            debug!(id = %memory.id, community_id = %memory.community_id, "Storing memory");
            memories.insert(memory.id.clone(), memory);
        }
        self.save().await
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        community_id: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let memories = self.memories.read().await;

        let mut results: Vec<SearchResult> = memories
            .values()
            .filter(|m| m.community_id == community_id)
            .map(|m| {
                let score = cosine_similarity(query_embedding, &m.embedding);
                SearchResult::new(m.clone(), score)
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        Ok(results)
    }

    async fn count(&self, community_id: &str) -> Result<usize> {
        let memories = self.memories.read().await;
        Ok(memories
            .values()
            .filter(|m| m.community_id == community_id)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryKind;

    async fn make_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().to_path_buf()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_store_and_search() {
        let (_dir, store) = make_store().await;
        let embedding = vec![0.5; 16];

        store
            .store(Memory::new(
                "c1",
                "e1",
                MemoryKind::Document,
                "the first excerpt",
                embedding.clone(),
            ))
            .await
            .unwrap();

        let results = store.search(&embedding, "c1", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].memory.content, "the first excerpt");
    }

    #[tokio::test]
    async fn test_community_isolation() {
        let (_dir, store) = make_store().await;
        let embedding = vec![0.5; 16];

        store
            .store(Memory::new(
                "community-a",
                "e1",
                MemoryKind::Document,
                "secret for A",
                embedding.clone(),
            ))
            .await
            .unwrap();
        store
            .store(Memory::new(
                "community-b",
                "e1",
                MemoryKind::Document,
                "secret for B",
                embedding.clone(),
            ))
            .await
            .unwrap();

        let results = store.search(&embedding, "community-a", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].memory.content, "secret for A");

        let results = store.search(&embedding, "community-b", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].memory.content, "secret for B");
    }

    #[tokio::test]
    async fn test_search_orders_by_similarity() {
        let (_dir, store) = make_store().await;

        store
            .store(Memory::new(
                "c1",
                "near",
                MemoryKind::Document,
                "near",
                vec![1.0, 0.0, 0.0],
            ))
            .await
            .unwrap();
        store
            .store(Memory::new(
                "c1",
                "far",
                MemoryKind::Document,
                "far",
                vec![0.0, 1.0, 0.0],
            ))
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], "c1", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].memory.content, "near");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let store = LocalStore::new(dir.path().to_path_buf()).await.unwrap();
            store
                .store(Memory::new(
                    "c1",
                    "e1",
                    MemoryKind::Interaction,
                    "remembered",
                    vec![0.5; 8],
                ))
                .await
                .unwrap();
        }

        let reopened = LocalStore::new(dir.path().to_path_buf()).await.unwrap();
        assert_eq!(reopened.count("c1").await.unwrap(), 1);
    }
}
