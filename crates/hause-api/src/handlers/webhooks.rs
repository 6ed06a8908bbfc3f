//! Inbound webhook handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::warn;

use hause_models::CommunityId;
use hause_telegram::Update;

use crate::state::AppState;
use crate::types::WebhookAck;

/// POST /api/webhooks/telegram/:id - Handle a Telegram update.
///
/// Always acknowledges with `{"ok": true}`: a retry from the platform would
/// only replay the same message. Unreadable payloads are the one exception,
/// rejected by the JSON extractor before this handler runs.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<Update>,
) -> Json<WebhookAck> {
    let id = CommunityId::from(id);
    if let Err(e) = state.responder.handle_update(&id, &update).await {
        warn!(community_id = %id, error = %e, "Webhook handling failed");
    }

    Json(WebhookAck { ok: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_test_state_with, MockMessenger};
    use hause_models::{Community, CommunityStatus, CommunityUpdate};
    use hause_telegram::{Chat, InboundMessage};
    use std::sync::Arc;

    fn update_with_text(text: &str) -> Update {
        Update {
            message: Some(InboundMessage {
                chat: Chat { id: 555 },
                text: Some(text.to_string()),
                from: None,
            }),
        }
    }

    #[tokio::test]
    async fn test_webhook_replies_to_mention() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, state) = make_test_state_with(messenger.clone()).await;

        let community = Community::new("local-operator", "Test")
            .with_credentials("token-1", "-100");
        let id = community.id.clone();
        state.store.insert(community).await.unwrap();
        state
            .store
            .update_fields(
                &id,
                CommunityUpdate {
                    status: Some(CommunityStatus::Active),
                    bot_name: Some("hausebot".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let ack = telegram_webhook(
            State(state.clone()),
            Path(id.to_string()),
            Json(update_with_text("@hausebot what's new")),
        )
        .await;

        assert!(ack.ok);
        let (_, chat, _) = messenger.last_sent().await.unwrap();
        assert_eq!(chat, "555");
        assert_eq!(state.memory.count(id.as_str()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_webhook_always_acks_unknown_community() {
        let messenger = Arc::new(MockMessenger::new());
        let (_dir, state) = make_test_state_with(messenger.clone()).await;

        let ack = telegram_webhook(
            State(state),
            Path("missing".to_string()),
            Json(update_with_text("@hausebot hello")),
        )
        .await;

        assert!(ack.ok);
        assert_eq!(messenger.sent_count().await, 0);
    }
}
