//! Response DTOs for the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use hause_models::{Community, DocumentInfo, PostLogEntry};

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Community list response.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityListResponse {
    /// List of communities.
    pub communities: Vec<CommunitySummary>,
    /// Total count.
    pub total: usize,
}

/// Community summary for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct CommunitySummary {
    /// Community ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text purpose.
    pub purpose: String,
    /// Lifecycle status.
    pub status: String,
    /// Whether bot credential and chat id are configured.
    pub connected: bool,
    /// When the community was created.
    pub created_at: DateTime<Utc>,
}

impl From<&Community> for CommunitySummary {
    fn from(community: &Community) -> Self {
        Self {
            id: community.id.to_string(),
            name: community.name.clone(),
            purpose: community.purpose.clone(),
            status: format!("{:?}", community.status).to_lowercase(),
            connected: community.credentials().is_some(),
            created_at: community.created_at,
        }
    }
}

/// Community detail response.
///
/// The bot token is write-only: it never appears in responses.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityDetailResponse {
    pub id: String,
    pub name: String,
    pub purpose: String,
    pub status: String,
    pub rules: Vec<String>,
    pub moderation_level: String,
    pub engagement_style: String,
    pub posting_frequency: String,
    pub chat_id: Option<String>,
    pub bot_name: Option<String>,
    pub connected: bool,
    pub documents: Vec<DocumentInfo>,
    pub post_log: Vec<PostLogEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Community> for CommunityDetailResponse {
    fn from(community: &Community) -> Self {
        Self {
            id: community.id.to_string(),
            name: community.name.clone(),
            purpose: community.purpose.clone(),
            status: format!("{:?}", community.status).to_lowercase(),
            rules: community.rules.clone(),
            moderation_level: community.moderation_level.as_str().to_string(),
            engagement_style: community.engagement_style.as_str().to_string(),
            posting_frequency: community.posting_frequency.as_str().to_string(),
            chat_id: community.chat_id.clone(),
            bot_name: community.bot_name.clone(),
            connected: community.credentials().is_some(),
            documents: community.documents.clone(),
            post_log: community.post_log.clone(),
            created_at: community.created_at,
            updated_at: community.updated_at,
        }
    }
}

/// Document ingestion response.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentsAddedResponse {
    /// Descriptors of the ingested documents.
    pub documents: Vec<DocumentInfo>,
    /// Total count.
    pub total: usize,
}

/// Post-now response.
#[derive(Debug, Clone, Serialize)]
pub struct PostNowResponse {
    /// Success message.
    pub message: String,
    /// The content that was sent.
    pub content: String,
}

/// Generic success response.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    /// Success message.
    pub message: String,
}

/// Acknowledgement returned to the messaging platform for webhooks.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_seconds: 100,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_seconds\":100"));
    }

    #[test]
    fn test_summary_from_community() {
        let community = Community::new("operator-1", "Test").with_purpose("books");
        let summary = CommunitySummary::from(&community);

        assert_eq!(summary.name, "Test");
        assert_eq!(summary.purpose, "books");
        assert_eq!(summary.status, "inactive");
        assert!(!summary.connected);
    }

    #[test]
    fn test_detail_never_carries_bot_token() {
        let community = Community::new("operator-1", "Test").with_credentials("secret-token", "-1");
        let detail = CommunityDetailResponse::from(&community);
        assert!(detail.connected);

        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn test_detail_knob_labels() {
        let community = Community::new("operator-1", "Test");
        let detail = CommunityDetailResponse::from(&community);

        assert_eq!(detail.moderation_level, "medium");
        assert_eq!(detail.engagement_style, "friendly");
        assert_eq!(detail.posting_frequency, "moderate");
    }
}
