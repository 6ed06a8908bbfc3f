//! Request DTOs for the API.

use serde::Deserialize;

/// Create community request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommunityRequest {
    /// Community name.
    pub name: String,
    /// Optional free-text purpose.
    pub purpose: Option<String>,
}

/// Connect a Telegram community request.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectCommunityRequest {
    /// Bot token issued by BotFather.
    pub bot_token: String,
    /// Target chat or channel id.
    pub chat_id: String,
    /// Optional display name for the community.
    pub name: Option<String>,
    /// Optional bot name used for mention detection.
    pub bot_name: Option<String>,
}

/// Document ingestion request: pre-extracted text excerpts.
#[derive(Debug, Clone, Deserialize)]
pub struct AddDocumentsRequest {
    pub documents: Vec<DocumentExcerpt>,
}

/// One text excerpt to index for a community.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentExcerpt {
    /// Original filename the excerpt came from.
    pub filename: String,
    /// Extracted text content.
    pub text: String,
}
