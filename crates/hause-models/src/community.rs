//! Community types for PowerHause.
//!
//! A community is a configured messaging destination (Telegram chat or
//! channel) managed on behalf of an operator, together with the knobs that
//! drive content generation and the append-only log of posts actually sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ids::CommunityId;

/// Lifecycle status of a community.
///
/// Transitions are caller-driven (create → inactive, deploy → active); any
/// status may be set by an update call, so `Active` is advisory rather than a
/// guarantee that a scheduler task exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommunityStatus {
    /// Not deployed; the bot does not respond and nothing is scheduled.
    #[default]
    Inactive,
    /// Deployed; the bot responds to mentions and posts on schedule.
    Active,
    /// Deployment in progress.
    Deploying,
}

/// How strictly generated content is moderated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ModerationLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl From<String> for ModerationLevel {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl ModerationLevel {
    /// Lowercase label used in generation prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Tone the bot uses when generating posts and replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EngagementStyle {
    Formal,
    #[default]
    Friendly,
    Casual,
}

impl From<String> for EngagementStyle {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "formal" => Self::Formal,
            "casual" => Self::Casual,
            _ => Self::Friendly,
        }
    }
}

impl EngagementStyle {
    /// Lowercase label used in generation prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Friendly => "friendly",
            Self::Casual => "casual",
        }
    }
}

/// Qualitative posting cadence, mapped to a fixed hour interval.
///
/// Unrecognized values parse to `Moderate`, so the derived interval for any
/// unknown setting is the safe 12h default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PostingFrequency {
    /// Once per day.
    Low,
    /// Twice per day.
    #[default]
    Moderate,
    /// Four times per day.
    High,
}

impl From<String> for PostingFrequency {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Moderate,
        }
    }
}

impl PostingFrequency {
    /// Returns the scheduling interval in hours.
    pub fn interval_hours(&self) -> u64 {
        match self {
            Self::Low => 24,
            Self::Moderate => 12,
            Self::High => 6,
        }
    }

    /// Returns the scheduling interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours() * 3600)
    }

    /// Lowercase label used in generation prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Origin of a post log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostOrigin {
    /// Triggered explicitly through the post-now endpoint.
    Immediate,
    /// Produced by the recurring scheduler cycle.
    Scheduled,
}

/// One entry in a community's append-only post log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLogEntry {
    /// Text that was actually sent.
    pub content: String,
    /// When the send succeeded.
    pub timestamp: DateTime<Utc>,
    /// Whether the post was scheduled or triggered explicitly.
    pub origin: PostOrigin,
}

impl PostLogEntry {
    /// Creates a log entry stamped with the current time.
    pub fn new(content: impl Into<String>, origin: PostOrigin) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
            origin,
        }
    }
}

/// Descriptor of an uploaded document (text lives in the memory store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Unique identifier of the document.
    pub id: String,
    /// Original filename.
    pub filename: String,
    /// Size of the ingested text in bytes.
    pub size: usize,
    /// When the document was ingested.
    pub uploaded_at: DateTime<Utc>,
}

/// A managed community record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    /// Unique identifier. Immutable once created.
    pub id: CommunityId,

    /// Operator that owns this community.
    pub owner_id: String,

    /// Display name.
    pub name: String,

    /// Bot credential. Set by the connect flow; absent until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// Target chat/channel identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,

    /// Name the bot answers to in the mention filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_name: Option<String>,

    /// Lifecycle status.
    pub status: CommunityStatus,

    /// Free-text purpose driving content generation.
    #[serde(default)]
    pub purpose: String,

    /// Community rule strings.
    #[serde(default)]
    pub rules: Vec<String>,

    /// Moderation strictness.
    pub moderation_level: ModerationLevel,

    /// Generation tone.
    pub engagement_style: EngagementStyle,

    /// Posting cadence.
    pub posting_frequency: PostingFrequency,

    /// Descriptors of ingested documents (append-only).
    #[serde(default)]
    pub documents: Vec<DocumentInfo>,

    /// Log of posts actually sent (append-only).
    #[serde(default)]
    pub post_log: Vec<PostLogEntry>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Community {
    /// Creates a new inactive community with default knobs.
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CommunityId::new(),
            owner_id: owner_id.into(),
            name: name.into(),
            bot_token: None,
            chat_id: None,
            bot_name: None,
            status: CommunityStatus::Inactive,
            purpose: String::new(),
            rules: Vec::new(),
            moderation_level: ModerationLevel::default(),
            engagement_style: EngagementStyle::default(),
            posting_frequency: PostingFrequency::default(),
            documents: Vec::new(),
            post_log: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the purpose (builder style).
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Sets bot credential and chat id (builder style).
    pub fn with_credentials(
        mut self,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        self.bot_token = Some(bot_token.into());
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Returns the bot token and chat id if both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.bot_token.as_deref(), self.chat_id.as_deref()) {
            (Some(token), Some(chat)) => Some((token, chat)),
            _ => None,
        }
    }
}

/// Field-level partial update for a community record.
///
/// Unset fields are left untouched by [`CommunityUpdate::apply`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunityUpdate {
    pub name: Option<String>,
    pub purpose: Option<String>,
    pub rules: Option<Vec<String>>,
    pub moderation_level: Option<ModerationLevel>,
    pub engagement_style: Option<EngagementStyle>,
    pub posting_frequency: Option<PostingFrequency>,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub bot_name: Option<String>,
    pub status: Option<CommunityStatus>,
}

impl CommunityUpdate {
    /// Applies the provided fields to a community and bumps `updated_at`.
    pub fn apply(self, community: &mut Community) {
        if let Some(name) = self.name {
            community.name = name;
        }
        if let Some(purpose) = self.purpose {
            community.purpose = purpose;
        }
        if let Some(rules) = self.rules {
            community.rules = rules;
        }
        if let Some(level) = self.moderation_level {
            community.moderation_level = level;
        }
        if let Some(style) = self.engagement_style {
            community.engagement_style = style;
        }
        if let Some(frequency) = self.posting_frequency {
            community.posting_frequency = frequency;
        }
        if let Some(token) = self.bot_token {
            community.bot_token = Some(token);
        }
        if let Some(chat) = self.chat_id {
            community.chat_id = Some(chat);
        }
        if let Some(bot_name) = self.bot_name {
            community.bot_name = Some(bot_name);
        }
        if let Some(status) = self.status {
            community.status = status;
        }
        community.updated_at = Utc::now();
    }
}
