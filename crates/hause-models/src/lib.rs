//! Core data models for PowerHause.
//!
//! This crate provides the fundamental data types used throughout the
//! PowerHause system: managed communities, their configuration knobs,
//! and the append-only post log.

pub mod community;
pub mod ids;

// Re-export main types
pub use community::{
    Community, CommunityStatus, CommunityUpdate, DocumentInfo, EngagementStyle, ModerationLevel,
    PostLogEntry, PostOrigin, PostingFrequency,
};
pub use ids::CommunityId;
