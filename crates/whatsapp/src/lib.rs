//! WhatsApp Cloud API adapter: webhook payload types, the subscription
//! handshake, and the outbound send client.

pub mod send;
pub mod webhook;

pub use send::{MessageSender, SendError};
pub use webhook::{extract_message, verify_subscription, EventPayload, InboundMessage, VerifyParams};
