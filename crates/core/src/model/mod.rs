mod activity;
mod event;
mod progress;
mod quiz;
mod snippet;
mod stats;

pub use activity::{DailyActivityLog, DailyActivityRecord};
pub use event::{ActivityEvent, EventError};
pub use progress::{EventApplied, ProgressState};
pub use quiz::{QuizQuestion, QuizScore, QuizScoreError};
pub use snippet::CodeSnippet;
pub use stats::{AggregateStats, StatsError};
