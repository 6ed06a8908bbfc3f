//! Similarity-searchable community memory for PowerHause.
//!
//! This crate stores uploaded-document excerpts and interaction history as
//! vector-embedded text entries, scoped per community. It supports multiple
//! backends:
//!
//! - **LocalStore**: file-based storage with brute-force cosine search, for
//!   development and small collections
//! - **QdrantStore**: Qdrant vector database for production use
//! - **NullStore**: explicit degraded mode when no vector store is configured
//!
//! # Example
//!
//! ```no_run
//! use hause_memory::{ContextIndex, EmbeddingGenerator, LocalStore, MemoryKind};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # async fn example() -> hause_memory::Result<()> {
//! let backend = Arc::new(LocalStore::new("/var/lib/powerhause/memory".into()).await?);
//! let index = ContextIndex::new(backend, EmbeddingGenerator::from_env());
//!
//! index
//!     .add("community-1", "doc-1", MemoryKind::Document, "useful excerpt", HashMap::new())
//!     .await?;
//!
//! let context = index.search("community-1", "what is useful?", 5).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Embedding providers
//!
//! Embeddings come from the Gemini embedding API when `GEMINI_API_KEY` is
//! set, and fall back to deterministic hash-based vectors otherwise, so every
//! code path works without credentials.

pub mod embedding;
pub mod error;
pub mod index;
pub mod local;
pub mod memory;
pub mod qdrant;
pub mod store;

// Re-export commonly used items
pub use embedding::{cosine_similarity, EmbeddingGenerator, EmbeddingProvider};
pub use error::{MemoryError, Result};
pub use index::ContextIndex;
pub use local::LocalStore;
pub use memory::{Memory, MemoryKind, SearchResult, DEFAULT_EMBEDDING_DIM};
pub use qdrant::QdrantStore;
pub use store::{MemoryStore, NullStore};
