use chrono::NaiveDateTime;

/// The user's saved editor buffer.
///
/// A single snippet is kept; saving replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSnippet {
    pub code: String,
    pub language: String,
    pub saved_at: NaiveDateTime,
}

impl CodeSnippet {
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        saved_at: NaiveDateTime,
    ) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            saved_at,
        }
    }
}
