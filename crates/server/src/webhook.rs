use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use secrecy::SecretString;
use tracing::{error, info};
use uuid::Uuid;

use botify_agent::{AgentRuntime, GroqClient};
use botify_catalog::CatalogClient;
use botify_whatsapp::{
    extract_message, verify_subscription, EventPayload, MessageSender, VerifyParams,
};

const INDEX_BANNER: &str = "🟢 Botify WhatsApp Chatbot Running";
const INVALID_VERIFY_TOKEN: &str = "Token de vérification invalide";

#[derive(Clone)]
pub struct WebhookState {
    pub runtime: Arc<AgentRuntime<GroqClient, CatalogClient>>,
    pub sender: MessageSender,
    pub verify_token: SecretString,
}

pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/webhook", get(verify).post(receive))
        .with_state(state)
}

async fn index() -> &'static str {
    INDEX_BANNER
}

async fn verify(
    State(state): State<WebhookState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    match verify_subscription(&params, &state.verify_token) {
        Some(challenge) => (StatusCode::OK, challenge).into_response(),
        None => (StatusCode::FORBIDDEN, INVALID_VERIFY_TOKEN).into_response(),
    }
}

async fn receive(
    State(state): State<WebhookState>,
    Json(payload): Json<EventPayload>,
) -> Response {
    // Payloads without a text message (delivery statuses, media) are
    // acknowledged and dropped.
    let Some(message) = extract_message(&payload) else {
        return (StatusCode::OK, "OK").into_response();
    };

    let correlation_id = Uuid::new_v4().to_string();
    info!(
        event_name = "webhook.message.received",
        correlation_id = %correlation_id,
        from = %message.from,
        "inbound message received"
    );

    let reply = match state.runtime.handle_message(&message.text, &message.from).await {
        Ok(reply) => reply,
        Err(dispatch_error) => {
            error!(
                event_name = "webhook.message.failed",
                correlation_id = %correlation_id,
                error = %dispatch_error,
                "message handling aborted; no reply sent"
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if let Err(send_error) = state.sender.send_text(&message.from, &reply).await {
        error!(
            event_name = "webhook.reply_send.failed",
            correlation_id = %correlation_id,
            error = %send_error,
            "reply could not be delivered"
        );
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (StatusCode::OK, "OK").into_response()
}
