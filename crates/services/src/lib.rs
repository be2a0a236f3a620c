#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod quiz;
pub mod session_tracker;
pub mod snippet_service;

pub use codetrack_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressError, QuizError, SessionError, SnippetError};
pub use progress_service::{DEFAULT_CALENDAR_WINDOW_DAYS, ProgressService};
pub use quiz::{QuizAnswer, QuizOutcome, QuizProgress, QuizRun};
pub use session_tracker::{CompletedSession, SessionTracker};
pub use snippet_service::SnippetService;
