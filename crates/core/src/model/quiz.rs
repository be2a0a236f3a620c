use thiserror::Error;

/// A single true/false question.
///
/// Question content comes from the caller; the engine only cares about the
/// expected answer and the feedback text shown after answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: u32,
    pub prompt: String,
    pub answer: bool,
    pub explanation: String,
    pub category: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizScoreError {
    #[error("a quiz needs at least one question")]
    Empty,

    #[error("correct count {correct} exceeds question count {total}")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

/// Final tally for a completed quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    correct: u32,
    total: u32,
}

impl QuizScore {
    /// # Errors
    ///
    /// Returns `QuizScoreError::Empty` for a zero-question quiz and
    /// `QuizScoreError::CorrectExceedsTotal` when the counts cannot come from
    /// one run.
    pub fn new(correct: u32, total: u32) -> Result<Self, QuizScoreError> {
        if total == 0 {
            return Err(QuizScoreError::Empty);
        }
        if correct > total {
            return Err(QuizScoreError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self { correct, total })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Percentage score rounded to the nearest integer, always in 0..=100.
    #[must_use]
    pub fn percent(&self) -> u8 {
        let correct = u64::from(self.correct);
        let total = u64::from(self.total);
        let rounded = (correct * 100 + total / 2) / total;
        u8::try_from(rounded).unwrap_or(100)
    }

    /// Letter grade for the run: >= 80 A, >= 60 B, >= 40 C, otherwise F.
    #[must_use]
    pub fn grade(&self) -> char {
        match self.percent() {
            80..=100 => 'A',
            60..=79 => 'B',
            40..=59 => 'C',
            _ => 'F',
        }
    }
}
