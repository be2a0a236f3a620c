//! Interactive quiz run over a fixed set of true/false questions.
//!
//! A run walks the questions in order, grades each answer immediately,
//! and reports the final percentage to the progress service exactly once
//! when finished.

use codetrack_core::model::{AggregateStats, QuizQuestion, QuizScore};

use crate::error::QuizError;
use crate::progress_service::ProgressService;

/// Feedback for a single answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAnswer {
    pub question_id: u32,
    pub your_answer: bool,
    pub expected: bool,
    pub correct: bool,
    pub explanation: String,
}

/// Position within a quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub answered: usize,
    pub total: usize,
    pub is_complete: bool,
}

/// Outcome of reporting a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: QuizScore,
    pub stats: AggregateStats,
}

pub struct QuizRun {
    questions: Vec<QuizQuestion>,
    answers: Vec<QuizAnswer>,
    reported: bool,
}

impl QuizRun {
    /// Starts a run over `questions`, asked in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::Empty`] when there are no questions.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self {
            questions,
            answers: Vec::new(),
            reported: false,
        })
    }

    /// The question awaiting an answer, or `None` once the run is complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.answers.len())
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            answered: self.answers.len(),
            total: self.questions.len(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Answers the current question and returns the graded feedback.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::Completed`] when every question has already
    /// been answered.
    pub fn answer_current(&mut self, answer: bool) -> Result<QuizAnswer, QuizError> {
        let Some(question) = self.questions.get(self.answers.len()) else {
            return Err(QuizError::Completed);
        };

        let graded = QuizAnswer {
            question_id: question.id,
            your_answer: answer,
            expected: question.answer,
            correct: answer == question.answer,
            explanation: question.explanation.clone(),
        };
        self.answers.push(graded.clone());
        Ok(graded)
    }

    #[must_use]
    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }

    fn correct_count(&self) -> u32 {
        self.answers.iter().filter(|a| a.correct).count() as u32
    }

    /// The final score of a completed run.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::Incomplete`] while questions remain.
    pub fn final_score(&self) -> Result<QuizScore, QuizError> {
        if !self.is_complete() {
            return Err(QuizError::Incomplete);
        }
        let score = QuizScore::new(self.correct_count(), self.questions.len() as u32)?;
        Ok(score)
    }

    /// Reports the final score to the progress service.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::Incomplete`] while questions remain and
    /// [`QuizError::AlreadyReported`] on a second call, so a run updates
    /// the best-score mark at most once.
    pub async fn finish(&mut self, progress: &ProgressService) -> Result<QuizOutcome, QuizError> {
        if self.reported {
            return Err(QuizError::AlreadyReported);
        }
        let score = self.final_score()?;
        let stats = progress.record_quiz_completed(score.percent()).await?;
        self.reported = true;
        Ok(QuizOutcome { score, stats })
    }
}
