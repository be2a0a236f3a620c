use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use codetrack_core::Clock;
use codetrack_core::calendar::IntensityLevel;
use codetrack_core::model::QuizQuestion;
use codetrack_core::time::fixed_clock;
use services::{AppServices, ProgressService, QuizRun};
use storage::repository::Storage;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn service_at(storage: &Storage, day: NaiveDate) -> ProgressService {
    let clock = Clock::fixed(day.and_hms_opt(9, 0, 0).unwrap());
    ProgressService::new(clock, Arc::clone(&storage.progress))
}

#[tokio::test]
async fn a_week_of_practice_builds_and_breaks_a_streak() {
    let storage = Storage::in_memory();

    // Three consecutive days.
    for (day, duration) in [(10, 600), (11, 300), (12, 900)] {
        service_at(&storage, date(day))
            .record_session_ended(duration)
            .await
            .unwrap();
    }
    let stats = service_at(&storage, date(12))
        .aggregate_stats()
        .await
        .unwrap();
    assert_eq!(stats.streak_days(), 3);
    assert_eq!(stats.total_sessions(), 3);
    assert_eq!(stats.total_time_spent_seconds(), 1800);
    assert_eq!(stats.last_active_date(), Some(date(12)));

    // A missed day resets the streak, not the totals.
    let stats = service_at(&storage, date(14))
        .record_session_ended(60)
        .await
        .unwrap();
    assert_eq!(stats.streak_days(), 1);
    assert_eq!(stats.total_sessions(), 4);
    assert_eq!(stats.total_time_spent_seconds(), 1860);
}

#[tokio::test]
async fn same_day_sessions_count_once_toward_the_streak() {
    let storage = Storage::in_memory();
    let service = service_at(&storage, date(20));

    for _ in 0..5 {
        service.record_session_ended(120).await.unwrap();
    }

    let stats = service.aggregate_stats().await.unwrap();
    assert_eq!(stats.streak_days(), 1);
    assert_eq!(stats.total_sessions(), 5);
}

#[tokio::test]
async fn calendar_mirrors_the_daily_log() {
    let storage = Storage::in_memory();
    service_at(&storage, date(10))
        .record_session_ended(600)
        .await
        .unwrap();
    let today_service = service_at(&storage, date(12));
    today_service.record_session_ended(300).await.unwrap();
    today_service.record_session_ended(60).await.unwrap();

    let calendar = today_service.calendar().await.unwrap();
    assert_eq!(calendar.len(), 365);
    assert_eq!(calendar.first().unwrap().date, date(12) - Duration::days(364));
    assert_eq!(calendar.last().unwrap().date, date(12));

    let by_date = |d: NaiveDate| calendar.iter().find(|c| c.date == d).unwrap();
    assert_eq!(by_date(date(10)).intensity, IntensityLevel::Low);
    assert_eq!(by_date(date(11)).intensity, IntensityLevel::None);
    assert_eq!(by_date(date(12)).intensity, IntensityLevel::Medium);
    assert_eq!(by_date(date(12)).time_spent_seconds, 360);
}

#[tokio::test]
async fn quizzes_and_sessions_stay_independent() {
    let storage = Storage::in_memory();
    let service = service_at(&storage, date(15));

    service.record_quiz_completed(80).await.unwrap();
    let stats = service.aggregate_stats().await.unwrap();
    assert_eq!(stats.best_quiz_score_percent(), 80);
    assert_eq!(stats.streak_days(), 0);

    service.record_session_ended(300).await.unwrap();
    let stats = service.record_quiz_completed(60).await.unwrap();
    assert_eq!(stats.best_quiz_score_percent(), 80);
    assert_eq!(stats.streak_days(), 1);
    assert_eq!(stats.total_sessions(), 1);
}

#[tokio::test]
async fn end_to_end_session_quiz_and_snippet_flow() {
    let services = AppServices::new_in_memory(fixed_clock());

    let mut session = services.new_session();
    session.start(services.clock().now());
    let completed = session
        .end(services.clock().now() + Duration::seconds(1500))
        .await
        .unwrap();
    assert_eq!(completed.duration_seconds, 1500);

    let questions = vec![
        QuizQuestion {
            id: 1,
            prompt: "ownership moves by default".to_string(),
            answer: true,
            explanation: "assignment transfers ownership of non-Copy values".to_string(),
            category: "ownership".to_string(),
        },
        QuizQuestion {
            id: 2,
            prompt: "a &mut reference may alias a & reference".to_string(),
            answer: false,
            explanation: "mutable references are exclusive".to_string(),
            category: "borrowing".to_string(),
        },
    ];
    let mut run = QuizRun::new(questions).unwrap();
    run.answer_current(true).unwrap();
    run.answer_current(false).unwrap();
    let outcome = run.finish(&services.progress()).await.unwrap();
    assert_eq!(outcome.score.percent(), 100);
    assert_eq!(outcome.score.grade(), 'A');

    services
        .snippets()
        .save("fn main() {}", "rust")
        .await
        .unwrap();

    let stats = services.progress().aggregate_stats().await.unwrap();
    assert_eq!(stats.total_sessions(), 1);
    assert_eq!(stats.total_time_spent_seconds(), 1500);
    assert_eq!(stats.streak_days(), 1);
    assert_eq!(stats.best_quiz_score_percent(), 100);

    let snippet = services.snippets().load().await.unwrap().unwrap();
    assert_eq!(snippet.language, "rust");
    assert_eq!(snippet.saved_at, services.clock().now());
}

#[tokio::test]
async fn reads_are_idempotent() {
    let storage = Storage::in_memory();
    let service = service_at(&storage, date(15));
    service.record_session_ended(600).await.unwrap();

    let first = service.aggregate_stats().await.unwrap();
    let second = service.aggregate_stats().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        service.calendar().await.unwrap(),
        service.calendar().await.unwrap()
    );
}
