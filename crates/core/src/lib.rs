//! Shared foundation for the botify workspace: layered configuration and the
//! conversation domain types every other crate speaks in.

pub mod config;
pub mod domain;

pub use chrono;
pub use domain::intent::{Intent, IntentAnalysis, RequestedInfo};
pub use domain::message::{ChatMessage, ChatRole, StoredMessage};
