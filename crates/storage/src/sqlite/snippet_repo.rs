use async_trait::async_trait;
use chrono::NaiveDateTime;
use codetrack_core::model::CodeSnippet;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{SnippetRepository, StorageError};

#[async_trait]
impl SnippetRepository for SqliteRepository {
    async fn save_snippet(&self, snippet: &CodeSnippet) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO saved_snippets (id, code, language, saved_at)
                VALUES (1, ?1, ?2, ?3)
                ON CONFLICT(id) DO UPDATE SET
                    code = excluded.code,
                    language = excluded.language,
                    saved_at = excluded.saved_at
            ",
        )
        .bind(&snippet.code)
        .bind(&snippet.language)
        .bind(snippet.saved_at)
        .execute(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn load_snippet(&self) -> Result<Option<CodeSnippet>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT code, language, saved_at
                FROM saved_snippets
                WHERE id = 1
            ",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let code: String = row
            .try_get("code")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let language: String = row
            .try_get("language")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let saved_at: NaiveDateTime = row
            .try_get("saved_at")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Some(CodeSnippet::new(code, language, saved_at)))
    }
}
