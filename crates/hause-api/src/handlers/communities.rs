//! Community lifecycle handlers.
//!
//! User-initiated requests surface invalid input and missing records as
//! rejected requests; unavailable dependencies (memory store, scheduler
//! bookkeeping) degrade with a warning instead of failing the call, except
//! where the whole point of the call is the external effect (connect
//! validation, post-now delivery).

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use hause_memory::MemoryKind;
use hause_models::{
    Community, CommunityId, CommunityStatus, CommunityUpdate, DocumentInfo, PostOrigin,
};
use hause_telegram::webhook_url;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::{
    AddDocumentsRequest, CommunityDetailResponse, CommunityListResponse, CommunitySummary,
    ConnectCommunityRequest, CreateCommunityRequest, DocumentsAddedResponse, PostNowResponse,
    SuccessResponse,
};

/// Message sent to the chat to confirm the bot can post there.
const CONNECT_TRIAL_MESSAGE: &str =
    "🤖 Bot connected successfully! This is a test message.";

/// POST /api/communities - Create a new community.
pub async fn create_community(
    State(state): State<AppState>,
    Json(req): Json<CreateCommunityRequest>,
) -> Result<(StatusCode, Json<CommunityDetailResponse>)> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("community name is required".into()));
    }

    let community = Community::new(&state.config.operator_id, req.name.trim())
        .with_purpose(req.purpose.as_deref().unwrap_or("").trim());
    let response = CommunityDetailResponse::from(&community);
    state.store.insert(community).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/communities - List the operator's communities.
pub async fn list_communities(
    State(state): State<AppState>,
) -> Result<Json<CommunityListResponse>> {
    let communities = state.store.find_by_owner(&state.config.operator_id).await?;
    let summaries: Vec<CommunitySummary> =
        communities.iter().map(CommunitySummary::from).collect();
    let total = summaries.len();

    Ok(Json(CommunityListResponse {
        communities: summaries,
        total,
    }))
}

/// GET /api/communities/:id - Get a community by ID.
pub async fn get_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CommunityDetailResponse>> {
    let community = state.store.find(&CommunityId::from(id)).await?;
    Ok(Json(CommunityDetailResponse::from(&community)))
}

/// PUT /api/communities/:id - Partial settings update.
pub async fn update_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<CommunityUpdate>,
) -> Result<Json<CommunityDetailResponse>> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "community name cannot be empty".into(),
            ));
        }
    }

    let community = state
        .store
        .update_fields(&CommunityId::from(id), update)
        .await?;

    Ok(Json(CommunityDetailResponse::from(&community)))
}

/// POST /api/communities/connect - Connect a Telegram community.
///
/// Validates the credential with `getMe`, confirms send permission with a
/// trial message, registers the inbound webhook, and inserts the record.
/// Validation failure is a rejected request, not a silent fallback.
pub async fn connect_community(
    State(state): State<AppState>,
    Json(req): Json<ConnectCommunityRequest>,
) -> Result<(StatusCode, Json<CommunityDetailResponse>)> {
    if req.bot_token.trim().is_empty() || req.chat_id.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "bot token and chat id are required".into(),
        ));
    }

    if !state.messenger.validate(&req.bot_token).await {
        return Err(ApiError::BadRequest("invalid Telegram bot token".into()));
    }

    if !state
        .messenger
        .send(&req.bot_token, &req.chat_id, CONNECT_TRIAL_MESSAGE)
        .await
    {
        return Err(ApiError::BadRequest(
            "bot cannot post to the specified chat".into(),
        ));
    }

    let name = req
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Telegram Community");
    let mut community = Community::new(&state.config.operator_id, name)
        .with_credentials(req.bot_token.clone(), req.chat_id);
    community.bot_name = req.bot_name;

    // Best effort: a missed registration can be repeated on redeploy, and
    // the credential is already proven live.
    let url = webhook_url(&state.config.public_base_url, community.id.as_str());
    if !state.messenger.register_webhook(&req.bot_token, &url).await {
        warn!(community_id = %community.id, url = %url, "Webhook registration failed");
    }

    let response = CommunityDetailResponse::from(&community);
    state.store.insert(community).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/communities/:id/documents - Ingest text excerpts.
pub async fn add_documents(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddDocumentsRequest>,
) -> Result<Json<DocumentsAddedResponse>> {
    let id = CommunityId::from(id);
    state.store.find(&id).await?;

    let mut added = Vec::new();
    for excerpt in &req.documents {
        let document_id = Uuid::new_v4().to_string();

        let metadata = HashMap::from([(
            "filename".to_string(),
            serde_json::Value::String(excerpt.filename.clone()),
        )]);
        if let Err(e) = state
            .memory
            .add(
                id.as_str(),
                &document_id,
                MemoryKind::Document,
                &excerpt.text,
                metadata,
            )
            .await
        {
            warn!(community_id = %id, filename = %excerpt.filename, error = %e, "Failed to index document text");
        }

        added.push(DocumentInfo {
            id: document_id,
            filename: excerpt.filename.clone(),
            size: excerpt.text.len(),
            uploaded_at: Utc::now(),
        });
    }

    state.store.append_documents(&id, added.clone()).await?;

    let total = added.len();
    Ok(Json(DocumentsAddedResponse {
        documents: added,
        total,
    }))
}

/// POST /api/communities/:id/deploy - Activate and start the posting cycle.
pub async fn deploy_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let id = CommunityId::from(id);
    state
        .store
        .update_fields(
            &id,
            CommunityUpdate {
                status: Some(CommunityStatus::Active),
                ..Default::default()
            },
        )
        .await?;

    // Seed a config entry so the bot has at least one memory to draw on.
    let metadata = HashMap::from([(
        "type".to_string(),
        serde_json::Value::String("config".to_string()),
    )]);
    let seed = format!("Community deployed. Community ID: {}", id);
    if let Err(e) = state
        .memory
        .add(id.as_str(), "initial_config", MemoryKind::Config, &seed, metadata)
        .await
    {
        warn!(community_id = %id, error = %e, "Failed to seed deploy memory");
    }

    if let Err(e) = state.scheduler.start(&id).await {
        warn!(community_id = %id, error = %e, "Failed to start posting cycle");
    }

    info!(community_id = %id, "Community deployed");
    Ok(Json(SuccessResponse {
        message: "community manager activated".to_string(),
    }))
}

/// POST /api/communities/:id/pause - Stop the posting cycle and deactivate.
pub async fn pause_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let id = CommunityId::from(id);
    state.scheduler.stop(&id).await;

    state
        .store
        .update_fields(
            &id,
            CommunityUpdate {
                status: Some(CommunityStatus::Inactive),
                ..Default::default()
            },
        )
        .await?;

    info!(community_id = %id, "Community paused");
    Ok(Json(SuccessResponse {
        message: "community manager paused".to_string(),
    }))
}

/// POST /api/communities/:id/post-now - Trigger an immediate post.
pub async fn post_now(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostNowResponse>> {
    let id = CommunityId::from(id);
    let content = state.pipeline.post_now(&id, PostOrigin::Immediate).await?;

    Ok(Json(PostNowResponse {
        message: "post sent".to_string(),
        content,
    }))
}
