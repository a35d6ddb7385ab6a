//! Webhook endpoint that feeds Telegram updates into the registration flow.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;

use super::machine::RegistrationFlow;
use crate::channels::InboundEvent;
use crate::channels::telegram::WEBHOOK_PATH;

/// Shared state for the webhook route.
#[derive(Clone)]
pub struct WebhookState {
    pub flow: Arc<RegistrationFlow>,
}

/// POST /api/webhook
///
/// Answers 400 when the body is not JSON. Any JSON update is acknowledged
/// with 200 once the flow has handled it, whatever the outcome, so Telegram
/// does not redeliver it.
async fn receive_update(State(state): State<WebhookState>, body: Bytes) -> impl IntoResponse {
    let update: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(bytes = body.len(), "Rejecting webhook body: {e}");
            return (StatusCode::BAD_REQUEST, "Error");
        }
    };

    let event = InboundEvent::from_update(update);
    tracing::debug!(user_id = event.user_id(), "Webhook update received");
    let outcome = state.flow.handle(event).await;
    tracing::debug!(?outcome, "Webhook update handled");

    (StatusCode::OK, "OK")
}

/// Build the webhook route.
pub fn webhook_routes(state: WebhookState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(receive_update))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::channels::Messenger;
    use crate::error::ChannelError;
    use crate::store::{LibSqlBackend, ProfileStore};

    #[derive(Default)]
    struct CountingMessenger {
        texts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Messenger for CountingMessenger {
        fn name(&self) -> &str {
            "counting"
        }

        async fn send_text(&self, _chat_id: &str, text: &str) -> Result<(), ChannelError> {
            self.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn send_options(
            &self,
            chat_id: &str,
            text: &str,
            _options: &[&str],
        ) -> Result<(), ChannelError> {
            self.send_text(chat_id, text).await
        }
    }

    async fn app() -> (Router, Arc<LibSqlBackend>, Arc<CountingMessenger>) {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let messenger = Arc::new(CountingMessenger::default());
        let flow = Arc::new(RegistrationFlow::new(
            store.clone(),
            messenger.clone(),
            "/start",
        ));
        (webhook_routes(WebhookState { flow }), store, messenger)
    }

    async fn post_body(app: Router, body: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(WEBHOOK_PATH)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn non_json_is_rejected() {
        let (app, _store, messenger) = app().await;
        let (status, body) = post_body(app, "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Error");
        assert!(messenger.texts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn text_update_is_processed() {
        let (app, store, messenger) = app().await;
        let update = r#"{"message":{"chat":{"id":100},"from":{"id":42},"text":"Ana"}}"#;
        let (status, body) = post_body(app, update).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");

        assert_eq!(messenger.texts.lock().unwrap().len(), 1);
        let profile = store.get_profile("42").await.unwrap().unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn unknown_shape_is_acknowledged() {
        let (app, _store, messenger) = app().await;
        let (status, body) = post_body(app, r#"{"edited_message":{}}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
        assert!(messenger.texts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_still_acknowledged() {
        let (app, _store, messenger) = app().await;
        let update = r#"{"callback_query":{"message":{"chat":{"id":100}},"from":{"id":42},"data":"Fotos"}}"#;
        let (status, _) = post_body(app, update).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(messenger.texts.lock().unwrap().len(), 1);
    }
}
