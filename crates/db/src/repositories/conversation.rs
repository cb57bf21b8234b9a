use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use botify_core::{ChatRole, StoredMessage};

use super::{ConversationRepository, RepositoryError};
use crate::DbPool;

pub struct SqlConversationRepository {
    pool: DbPool,
}

impl SqlConversationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ConversationRepository for SqlConversationRepository {
    async fn append(
        &self,
        user_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO message (user_id, role, content, timestamp)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(role.as_str())
        .bind(content)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn recent_turns(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<StoredMessage>, RepositoryError> {
        // Newest rows first, then reversed so callers see oldest-first.
        // `id` breaks ties between rows written within the same instant.
        let rows = sqlx::query(
            "SELECT user_id, role, content, timestamp
             FROM message
             WHERE user_id = ?
             ORDER BY timestamp DESC, id DESC
             LIMIT ?",
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        let mut turns =
            rows.into_iter().map(message_from_row).collect::<Result<Vec<_>, _>>()?;
        turns.reverse();
        Ok(turns)
    }
}

fn message_from_row(row: SqliteRow) -> Result<StoredMessage, RepositoryError> {
    let raw_role = row.get::<String, _>("role");
    let role = ChatRole::parse(&raw_role)
        .ok_or_else(|| RepositoryError::Decode(format!("unknown message role `{raw_role}`")))?;

    Ok(StoredMessage {
        user_id: row.get::<String, _>("user_id"),
        role,
        content: row.get::<String, _>("content"),
        timestamp: row.get::<DateTime<Utc>, _>("timestamp"),
    })
}
