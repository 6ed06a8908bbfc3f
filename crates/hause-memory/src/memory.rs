//! Memory data model for community memory storage.
//!
//! The `Memory` struct represents a single piece of stored text with its
//! vector embedding for similarity search. Entries are write-once: nothing in
//! the system updates or deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default embedding dimension for Gemini text-embedding-004.
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Kind of stored memory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    /// Excerpt from an uploaded document.
    Document,
    /// Recorded message/reply exchange.
    Interaction,
    /// Configuration note seeded at deploy time.
    Config,
}

impl MemoryKind {
    /// Prefix used when composing entry ids, mirroring the id scheme of the
    /// underlying collection (`{community}_{entry}` for documents,
    /// `memory_{community}_{entry}` for everything else).
    pub fn compose_id(&self, community_id: &str, entry_id: &str) -> String {
        match self {
            Self::Document => format!("{}_{}", community_id, entry_id),
            Self::Interaction | Self::Config => {
                format!("memory_{}_{}", community_id, entry_id)
            }
        }
    }
}

/// A single memory entry stored in the vector database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Unique identifier for this entry.
    pub id: String,

    /// Community the entry belongs to. Search never crosses this boundary.
    pub community_id: String,

    /// Document excerpt vs. interaction log vs. config note.
    pub kind: MemoryKind,

    /// Original text content.
    pub content: String,

    /// Vector embedding for similarity search.
    pub embedding: Vec<f32>,

    /// Additional metadata stored with the entry.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// When this entry was created.
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Creates a new memory entry with a composed id and current timestamp.
    pub fn new(
        community_id: impl Into<String>,
        entry_id: &str,
        kind: MemoryKind,
        content: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        let community_id = community_id.into();
        Self {
            id: kind.compose_id(&community_id, entry_id),
            community_id,
            kind,
            content: content.into(),
            embedding,
            metadata: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds metadata to the entry (builder style).
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A memory search result with relevance score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched entry.
    pub memory: Memory,
    /// Similarity score, higher is more similar.
    pub score: f32,
}

impl SearchResult {
    pub fn new(memory: Memory, score: f32) -> Self {
        Self { memory, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_id_composition() {
        assert_eq!(
            MemoryKind::Document.compose_id("c1", "doc9"),
            "c1_doc9"
        );
        assert_eq!(
            MemoryKind::Interaction.compose_id("c1", "1700000000"),
            "memory_c1_1700000000"
        );
        assert_eq!(
            MemoryKind::Config.compose_id("c1", "initial_config"),
            "memory_c1_initial_config"
        );
    }

    #[test]
    fn test_memory_new() {
        let memory = Memory::new("c1", "e1", MemoryKind::Document, "excerpt", vec![0.1; 8]);
        assert_eq!(memory.id, "c1_e1");
        assert_eq!(memory.community_id, "c1");
        assert_eq!(memory.kind, MemoryKind::Document);
        assert!(memory.metadata.is_empty());
    }

    #[test]
    fn test_memory_with_metadata() {
        let memory = Memory::new("c1", "e1", MemoryKind::Document, "text", vec![0.1; 8])
            .with_metadata("filename", serde_json::json!("guide.pdf"));
        assert_eq!(
            memory.metadata.get("filename"),
            Some(&serde_json::json!("guide.pdf"))
        );
    }
}
