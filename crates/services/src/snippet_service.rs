//! Saving and restoring the single scratch-pad snippet.

use std::sync::Arc;

use codetrack_core::Clock;
use codetrack_core::model::CodeSnippet;
use storage::repository::SnippetRepository;

use crate::error::SnippetError;

pub struct SnippetService {
    clock: Clock,
    snippets: Arc<dyn SnippetRepository>,
}

impl SnippetService {
    #[must_use]
    pub fn new(clock: Clock, snippets: Arc<dyn SnippetRepository>) -> Self {
        Self { clock, snippets }
    }

    /// Saves `code` as the current snippet, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be written.
    pub async fn save(
        &self,
        code: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<CodeSnippet, SnippetError> {
        let snippet = CodeSnippet::new(code, language, self.clock.now());
        self.snippets.save_snippet(&snippet).await?;
        Ok(snippet)
    }

    /// Loads the saved snippet, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub async fn load(&self) -> Result<Option<CodeSnippet>, SnippetError> {
        let snippet = self.snippets.load_snippet().await?;
        Ok(snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codetrack_core::time::{fixed_clock, fixed_now};
    use storage::repository::Storage;

    fn service() -> SnippetService {
        let storage = Storage::in_memory();
        SnippetService::new(fixed_clock(), Arc::clone(&storage.snippets))
    }

    #[tokio::test]
    async fn save_stamps_the_clock_and_round_trips() {
        let service = service();
        assert_eq!(service.load().await.unwrap(), None);

        let saved = service.save("let x = 1;", "rust").await.unwrap();
        assert_eq!(saved.saved_at, fixed_now());
        assert_eq!(service.load().await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn saving_again_replaces_the_snippet() {
        let service = service();
        service.save("print('hi')", "python").await.unwrap();
        let second = service.save("puts 'hi'", "ruby").await.unwrap();

        let loaded = service.load().await.unwrap().unwrap();
        assert_eq!(loaded, second);
        assert_eq!(loaded.language, "ruby");
    }
}
