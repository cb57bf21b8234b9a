use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Query parameters of the Meta webhook verification handshake.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Echo the challenge iff the handshake is a subscribe request carrying the
/// configured verify token. Anything else is rejected.
pub fn verify_subscription(params: &VerifyParams, expected_token: &SecretString) -> Option<String> {
    let is_subscribe = params.mode.as_deref() == Some("subscribe");
    let token_matches =
        params.verify_token.as_deref() == Some(expected_token.expose_secret());

    if is_subscribe && token_matches {
        params.challenge.clone()
    } else {
        None
    }
}

/// Webhook event payload. Meta nests the interesting part several levels
/// deep; every level defaults to empty so status-only events decode cleanly.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub text: Option<TextBody>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub body: String,
}

/// The single message a payload carries, reduced to what the dispatcher
/// needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundMessage {
    pub from: String,
    pub text: String,
}

/// At most one message per payload; non-text messages and status-only
/// payloads yield `None` and are acknowledged without dispatch.
pub fn extract_message(payload: &EventPayload) -> Option<InboundMessage> {
    let value = &payload.entry.first()?.changes.first()?.value;
    let message = value.messages.first()?;
    let text = message.text.as_ref()?;

    Some(InboundMessage { from: message.from.clone(), text: text.body.clone() })
}
