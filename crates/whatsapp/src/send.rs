use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use botify_core::config::WhatsAppConfig;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("message send failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outbound text sender against the Graph API messages endpoint. The
/// response is logged but not inspected; delivery is best-effort.
#[derive(Clone)]
pub struct MessageSender {
    http: reqwest::Client,
    graph_base_url: String,
    phone_number_id: String,
    access_token: SecretString,
}

#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    text: OutboundText<'a>,
}

#[derive(Debug, Serialize)]
struct OutboundText<'a> {
    body: &'a str,
}

impl MessageSender {
    pub fn new(config: &WhatsAppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            graph_base_url: config.graph_base_url.clone(),
            phone_number_id: config.phone_number_id.clone(),
            access_token: config.access_token.clone(),
        }
    }

    pub async fn send_text(&self, to: &str, body: &str) -> Result<(), SendError> {
        let url = self.messages_endpoint();
        let payload = OutboundMessage {
            messaging_product: "whatsapp",
            to,
            text: OutboundText { body },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token.expose_secret())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await.unwrap_or_default();
        info!(
            event_name = "whatsapp.send.response",
            status = %status,
            body = %response_body,
            "messaging API responded"
        );

        Ok(())
    }

    fn messages_endpoint(&self) -> String {
        format!(
            "{base}/{phone_number_id}/messages",
            base = self.graph_base_url.trim_end_matches('/'),
            phone_number_id = self.phone_number_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use botify_core::config::WhatsAppConfig;

    use super::MessageSender;

    #[test]
    fn messages_endpoint_joins_base_and_phone_number_id() {
        let sender = MessageSender::new(&WhatsAppConfig {
            access_token: "meta-token".to_string().into(),
            phone_number_id: "1234567890".to_string(),
            verify_token: "verify-secret".to_string().into(),
            graph_base_url: "https://graph.facebook.com/v18.0/".to_string(),
        });

        assert_eq!(
            sender.messages_endpoint(),
            "https://graph.facebook.com/v18.0/1234567890/messages"
        );
    }
}
