//! Qdrant vector database backend for memory storage.
//!
//! Requires a running Qdrant server (local or remote). For development
//! without a server, see the `local` module.

use async_trait::async_trait;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, Distance, Filter, ScrollPointsBuilder,
    SearchPointsBuilder, UpsertPointsBuilder, Value, VectorParamsBuilder,
};
use qdrant_client::qdrant::PointStruct;
use qdrant_client::Qdrant;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{MemoryError, Result};
use crate::memory::{Memory, MemoryKind, SearchResult, DEFAULT_EMBEDDING_DIM};
use crate::store::MemoryStore;

/// Default collection name for community memory.
const COLLECTION_NAME: &str = "community_memory";

/// Payload field names.
const FIELD_COMMUNITY_ID: &str = "community_id";
const FIELD_KIND: &str = "kind";
const FIELD_CONTENT: &str = "content";
const FIELD_METADATA: &str = "metadata";
const FIELD_CREATED_AT: &str = "created_at";

/// Qdrant-based memory store.
///
/// Configuration:
/// - `QDRANT_URL` env var (default: http://localhost:6334)
/// - `QDRANT_API_KEY` (optional) for authentication
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl QdrantStore {
    /// Creates a new store connecting to the specified URL.
    pub async fn new(url: &str, api_key: Option<&str>) -> Result<Self> {
        Self::with_config(url, api_key, COLLECTION_NAME, DEFAULT_EMBEDDING_DIM).await
    }

    /// Creates a store from environment variables.
    pub async fn from_env() -> Result<Self> {
        let url =
            std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6334".to_string());
        let api_key = std::env::var("QDRANT_API_KEY").ok();
        Self::new(&url, api_key.as_deref()).await
    }

    /// Creates a store with a custom collection name and dimension.
    pub async fn with_config(
        url: &str,
        api_key: Option<&str>,
        collection: &str,
        dimension: usize,
    ) -> Result<Self> {
        let mut builder = Qdrant::from_url(url);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }

        let client = builder
            .build()
            .map_err(|e| MemoryError::DatabaseError(e.to_string()))?;

        let store = Self {
            client,
            collection: collection.to_string(),
            dimension,
        };

        store.ensure_collection().await?;
        Ok(store)
    }

    async fn ensure_collection(&self) -> Result<()> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| MemoryError::DatabaseError(e.to_string()))?;

        let exists = collections
            .collections
            .iter()
            .any(|c| c.name == self.collection);

        if !exists {
            info!(collection = %self.collection, "Creating Qdrant collection");
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection).vectors_config(
                        VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine),
                    ),
                )
                .await
                .map_err(|e| MemoryError::DatabaseError(e.to_string()))?;
        }

        Ok(())
    }

    fn memory_to_point(&self, memory: &Memory) -> PointStruct {
        let mut payload: HashMap<String, Value> = HashMap::new();
        payload.insert(
            FIELD_COMMUNITY_ID.to_string(),
            memory.community_id.clone().into(),
        );
        payload.insert(FIELD_KIND.to_string(), kind_label(memory.kind).into());
        payload.insert(FIELD_CONTENT.to_string(), memory.content.clone().into());
        payload.insert(
            FIELD_CREATED_AT.to_string(),
            memory.created_at.to_rfc3339().into(),
        );
        payload.insert(
            FIELD_METADATA.to_string(),
            serde_json::to_string(&memory.metadata)
                .unwrap_or_default()
                .into(),
        );

        // Qdrant point ids must be UUIDs or integers; derive a stable UUID
        // from the composed entry id so re-adding the same entry upserts.
        let point_id = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, memory.id.as_bytes());
        PointStruct::new(point_id.to_string(), memory.embedding.clone(), payload)
    }

    fn make_community_filter(&self, community_id: &str) -> Filter {
        Filter::must([Condition::matches(
            FIELD_COMMUNITY_ID,
            community_id.to_string(),
        )])
    }
}

fn point_to_memory(point: &qdrant_client::qdrant::ScoredPoint) -> Option<Memory> {
    let payload = &point.payload;
    let id = point.id.as_ref()?.point_id_options.as_ref()?;
    let id_str = match id {
        qdrant_client::qdrant::point_id::PointIdOptions::Uuid(u) => u.clone(),
        qdrant_client::qdrant::point_id::PointIdOptions::Num(n) => n.to_string(),
    };

    let community_id = payload
        .get(FIELD_COMMUNITY_ID)?
        .as_str()
        .map(|s| s.to_string())?;
    let kind = payload
        .get(FIELD_KIND)
        .and_then(|v| v.as_str())
        .map(|s| parse_kind(s))
        .unwrap_or(MemoryKind::Document);
    let content = payload
        .get(FIELD_CONTENT)?
        .as_str()
        .map(|s| s.to_string())?;
    let created_at_str = payload.get(FIELD_CREATED_AT)?.as_str()?;
    let created_at = chrono::DateTime::parse_from_rfc3339(created_at_str)
        .ok()?
        .with_timezone(&chrono::Utc);

    let metadata: HashMap<String, serde_json::Value> = payload
        .get(FIELD_METADATA)
        .and_then(|v| v.as_str())
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default();

    Some(Memory {
        id: id_str,
        community_id,
        kind,
        content,
        embedding: Vec::new(),
        metadata,
        created_at,
    })
}

fn kind_label(kind: MemoryKind) -> String {
    match kind {
        MemoryKind::Document => "document".to_string(),
        MemoryKind::Interaction => "interaction".to_string(),
        MemoryKind::Config => "config".to_string(),
    }
}

fn parse_kind(label: &str) -> MemoryKind {
    match label {
        "interaction" => MemoryKind::Interaction,
        "config" => MemoryKind::Config,
        _ => MemoryKind::Document,
    }
}

#[async_trait]
impl MemoryStore for QdrantStore {
    async fn store(&self, memory: Memory) -> Result<()> {
        let point = self.memory_to_point(&memory);
        debug!(id = %memory.id, community_id = %memory.community_id, "Storing memory");

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]))
            .await
            .map_err(|e| MemoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        community_id: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let filter = self.make_community_filter(community_id);

        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query_embedding.to_vec(), limit as u64)
                    .filter(filter)
                    .with_payload(true),
            )
            .await
            .map_err(|e| MemoryError::DatabaseError(e.to_string()))?;

        Ok(results
            .result
            .iter()
            .filter_map(|point| {
                point_to_memory(point)
                    .map(|m| SearchResult::new(m, point.score))
            })
            .collect())
    }

    async fn count(&self, community_id: &str) -> Result<usize> {
        let filter = self.make_community_filter(community_id);

        let results = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection)
                    .filter(filter)
                    .limit(10_000)
                    .with_payload(false),
            )
            .await
            .map_err(|e| MemoryError::DatabaseError(e.to_string()))?;

        Ok(results.result.len())
    }
}
