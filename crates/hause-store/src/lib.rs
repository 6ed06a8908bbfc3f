//! Community record persistence for PowerHause.
//!
//! This crate provides crash-safe persistence for community records using
//! atomic file operations (write to temp file, then rename). Each community is
//! stored as one JSON document keyed by its opaque id.
//!
//! # Example
//!
//! ```no_run
//! use hause_store::{CommunityStore, FileCommunityStore};
//! use hause_models::Community;
//!
//! # async fn example() -> hause_store::Result<()> {
//! let store = FileCommunityStore::new("/var/lib/powerhause");
//!
//! let community = Community::new("operator-1", "my-community");
//! let id = community.id.clone();
//! store.insert(community).await?;
//!
//! let loaded = store.find(&id).await?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod community_store;
pub mod error;

pub use community_store::{CommunityStore, FileCommunityStore};
pub use error::{Result, StoreError};
