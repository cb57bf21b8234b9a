use std::sync::Arc;

use botify_core::{ChatMessage, StoredMessage};
use botify_db::repositories::{ConversationRepository, RepositoryError};

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

const PRODUCT_DATA_INSTRUCTION: &str = "Instruction: Use only the provided product data to \
    answer. Extract specific variant attributes like color, size, material from the variant \
    list if asked. Do not claim missing data if it is present.";

/// Builds the per-request message list: an optional product-data system note
/// followed by the newest stored turns, oldest-first. History is re-fetched
/// on every call; turns older than the limit are silently dropped.
pub struct ContextAssembler {
    repository: Arc<dyn ConversationRepository>,
    history_limit: u32,
}

impl ContextAssembler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self::with_history_limit(repository, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(
        repository: Arc<dyn ConversationRepository>,
        history_limit: u32,
    ) -> Self {
        Self { repository, history_limit }
    }

    pub async fn assemble(
        &self,
        user_id: &str,
        product_data: Option<&str>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut context = Vec::new();

        if let Some(product_data) = product_data {
            context.push(ChatMessage::system(format!(
                "PRODUCT DATA:\n{}\n\n{PRODUCT_DATA_INSTRUCTION}",
                product_data.trim(),
            )));
        }

        let turns = self.repository.recent_turns(user_id, self.history_limit).await?;
        context.extend(turns.iter().map(StoredMessage::as_chat_message));

        Ok(context)
    }
}
