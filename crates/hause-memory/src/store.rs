//! MemoryStore trait definition for vector database backends.
//!
//! This module defines the interface that all memory storage backends must
//! implement, plus the [`NullStore`] used as the explicit degraded mode when
//! no vector database is configured.

use async_trait::async_trait;

use crate::error::{MemoryError, Result};
use crate::memory::{Memory, SearchResult};

/// Trait for memory storage backends.
///
/// Entries are write-once and strictly scoped to a community: `search` must
/// never return entries stored under a different community id.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Stores a memory entry.
    async fn store(&self, memory: Memory) -> Result<()>;

    /// Searches for similar entries within one community.
    ///
    /// Returns results ordered by similarity, most similar first.
    async fn search(
        &self,
        query_embedding: &[f32],
        community_id: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>>;

    /// Counts entries stored for a community.
    async fn count(&self, community_id: &str) -> Result<usize>;
}

/// Null backend: the explicit "no vector store configured" variant.
///
/// Writes fail fast so callers notice the store was never initialized;
/// searches degrade to an empty result so read paths keep working.
#[derive(Debug, Default)]
pub struct NullStore;

impl NullStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MemoryStore for NullStore {
    async fn store(&self, _memory: Memory) -> Result<()> {
        Err(MemoryError::NotInitialized)
    }

    async fn search(
        &self,
        _query_embedding: &[f32],
        _community_id: &str,
        _limit: usize,
    ) -> Result<Vec<SearchResult>> {
        Ok(Vec::new())
    }

    async fn count(&self, _community_id: &str) -> Result<usize> {
        Ok(0)
    }
}
