use async_trait::async_trait;
use thiserror::Error;

use botify_core::{ChatRole, StoredMessage};

pub mod conversation;
pub mod memory;

pub use conversation::SqlConversationRepository;
pub use memory::InMemoryConversationRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Append-only log of conversation turns. Every operation acquires its
/// connection from the pool and releases it before returning.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Insert one immutable turn; the timestamp is assigned at insertion.
    async fn append(
        &self,
        user_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<(), RepositoryError>;

    /// The newest `limit` turns for `user_id`, returned oldest-first.
    async fn recent_turns(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<StoredMessage>, RepositoryError>;
}
