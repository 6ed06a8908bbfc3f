//! Community record store.
//!
//! Records are stored as individual JSON files keyed by community id:
//! ```text
//! base_path/
//! └── communities/
//!     ├── {community_id}.json
//!     └── ...
//! ```

use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

use hause_models::{Community, CommunityId, CommunityUpdate, DocumentInfo, PostLogEntry};

use crate::atomic::{atomic_write_json, read_json};
use crate::error::{Result, StoreError};

/// Keyed persistence of community records.
///
/// All lookups are by opaque id; updates have field-level partial semantics
/// (unspecified fields untouched), and list fields are append-only.
#[async_trait]
pub trait CommunityStore: Send + Sync {
    /// Loads a community by id.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no record exists for the id.
    async fn find(&self, id: &CommunityId) -> Result<Community>;

    /// Lists all communities owned by the given operator.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Community>>;

    /// Persists a new community record.
    async fn insert(&self, community: Community) -> Result<()>;

    /// Applies a partial update to a record and returns the updated state.
    async fn update_fields(&self, id: &CommunityId, update: CommunityUpdate) -> Result<Community>;

    /// Appends one entry to the post log.
    async fn append_post(&self, id: &CommunityId, entry: PostLogEntry) -> Result<()>;

    /// Appends document descriptors to the document list.
    async fn append_documents(&self, id: &CommunityId, documents: Vec<DocumentInfo>) -> Result<()>;
}

/// File-backed community store using atomic JSON writes.
pub struct FileCommunityStore {
    base_path: PathBuf,
    /// Serializes read-modify-write cycles so concurrent partial updates
    /// cannot clobber each other.
    write_lock: Mutex<()>,
}

impl FileCommunityStore {
    /// Creates a new store rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn communities_dir(&self) -> PathBuf {
        self.base_path.join("communities")
    }

    fn community_path(&self, id: &CommunityId) -> PathBuf {
        self.communities_dir().join(format!("{}.json", id))
    }

    fn load(&self, id: &CommunityId) -> Result<Community> {
        let path = self.community_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        read_json(&path)
    }

    fn save(&self, community: &Community) -> Result<()> {
        let path = self.community_path(&community.id);
        atomic_write_json(&path, community)
    }
}

#[async_trait]
impl CommunityStore for FileCommunityStore {
    async fn find(&self, id: &CommunityId) -> Result<Community> {
        self.load(id)
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Community>> {
        let dir = self.communities_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut communities = Vec::new();
        let entries = fs::read_dir(&dir).map_err(|source| StoreError::ReadError {
            path: dir.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| StoreError::ReadError {
                path: dir.clone(),
                source,
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match read_json::<Community>(&path) {
                    Ok(community) if community.owner_id == owner_id => {
                        communities.push(community)
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable community record");
                    }
                }
            }
        }

        // Newest first, matching the dashboard's expectations
        communities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(communities)
    }

    async fn insert(&self, community: Community) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        debug!(community_id = %community.id, "Inserting community record");
        self.save(&community)
    }

    async fn update_fields(&self, id: &CommunityId, update: CommunityUpdate) -> Result<Community> {
        let _guard = self.write_lock.lock().await;
        let mut community = self.load(id)?;
        update.apply(&mut community);
        self.save(&community)?;
        Ok(community)
    }

    async fn append_post(&self, id: &CommunityId, entry: PostLogEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut community = self.load(id)?;
        community.post_log.push(entry);
        community.updated_at = chrono::Utc::now();
        self.save(&community)
    }

    async fn append_documents(&self, id: &CommunityId, documents: Vec<DocumentInfo>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut community = self.load(id)?;
        community.documents.extend(documents);
        community.updated_at = chrono::Utc::now();
        self.save(&community)
    }
}
