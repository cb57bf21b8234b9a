use chrono::Utc;
use tokio::sync::RwLock;

use botify_core::{ChatRole, StoredMessage};

use super::{ConversationRepository, RepositoryError};

/// In-memory stand-in for the SQL repository, used by tests that exercise
/// the pipeline without a database.
#[derive(Default)]
pub struct InMemoryConversationRepository {
    messages: RwLock<Vec<StoredMessage>>,
}

#[async_trait::async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn append(
        &self,
        user_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<(), RepositoryError> {
        let mut messages = self.messages.write().await;
        messages.push(StoredMessage {
            user_id: user_id.to_string(),
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn recent_turns(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<StoredMessage>, RepositoryError> {
        let messages = self.messages.read().await;
        let matching: Vec<StoredMessage> =
            messages.iter().filter(|message| message.user_id == user_id).cloned().collect();

        let skip = matching.len().saturating_sub(limit as usize);
        Ok(matching.into_iter().skip(skip).collect())
    }
}
