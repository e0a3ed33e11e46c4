//! Database tests

use super::*;
use crate::error::Error;
use crate::insights::{Insight, InsightKind, InsightSink, LogProvider, RuleId, Scope};
use crate::models::*;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(d: NaiveDate, mood: i64, sleep: f64) -> NewDailyRecord {
    NewDailyRecord {
        mood: Some(mood),
        energy: Some(3),
        sleep_hours: Some(sleep),
        work_hours: Some(8.0),
        meetings: Some(2),
        gym: Some(false),
        ..NewDailyRecord::new(d)
    }
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert_eq!(db.count_daily_logs("alice").unwrap(), 0);
}

#[test]
fn test_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let columns: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('insight_events') WHERE name IN ('user_id', 'insight_key', 'scope', 'period_start', 'type')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(columns, 5, "insight_events should have the dedup columns");
}

#[test]
fn test_upsert_daily_log_replaces_same_day() {
    let db = Database::in_memory().unwrap();
    let d = date(2026, 3, 2);

    let id = db.upsert_daily_log("alice", &record(d, 3, 7.0)).unwrap();
    assert!(id > 0);

    // Same user and day updates in place
    let id2 = db.upsert_daily_log("alice", &record(d, 5, 8.0)).unwrap();
    assert_eq!(id, id2);
    assert_eq!(db.count_daily_logs("alice").unwrap(), 1);

    let stored = db.get_daily_log("alice", d).unwrap().unwrap();
    assert_eq!(stored.mood, Some(5));
    assert_eq!(stored.sleep_hours, Some(8.0));
    assert_eq!(stored.gym, Some(false));
}

#[test]
fn test_daily_logs_are_per_user() {
    let db = Database::in_memory().unwrap();
    let d = date(2026, 3, 2);

    db.upsert_daily_log("alice", &record(d, 3, 7.0)).unwrap();
    db.upsert_daily_log("bob", &record(d, 1, 4.0)).unwrap();

    assert_eq!(db.count_daily_logs("alice").unwrap(), 1);
    assert_eq!(db.get_daily_log("bob", d).unwrap().unwrap().mood, Some(1));
    assert!(db.get_daily_log("carol", d).unwrap().is_none());
}

#[test]
fn test_upsert_rejects_out_of_range() {
    let db = Database::in_memory().unwrap();
    let mut bad = record(date(2026, 3, 2), 3, 7.0);
    bad.mood = Some(9);

    let err = db.upsert_daily_log("alice", &bad).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    assert_eq!(db.count_daily_logs("alice").unwrap(), 0);
}

#[test]
fn test_list_daily_logs_range_ascending() {
    let db = Database::in_memory().unwrap();
    for day in [5, 1, 3, 9] {
        db.upsert_daily_log("alice", &record(date(2026, 3, day), 3, 7.0))
            .unwrap();
    }

    let logs = db
        .list_daily_logs("alice", date(2026, 3, 1), date(2026, 3, 5))
        .unwrap();
    let days: Vec<_> = logs.iter().map(|l| l.date).collect();
    assert_eq!(days, vec![date(2026, 3, 1), date(2026, 3, 3), date(2026, 3, 5)]);
}

#[test]
fn test_delete_daily_log() {
    let db = Database::in_memory().unwrap();
    let d = date(2026, 3, 2);
    db.upsert_daily_log("alice", &record(d, 3, 7.0)).unwrap();

    assert!(db.delete_daily_log("alice", d).unwrap());
    assert!(!db.delete_daily_log("alice", d).unwrap());
    assert!(db.get_daily_log("alice", d).unwrap().is_none());
}

#[test]
fn test_optional_fields_round_trip_as_null() {
    let db = Database::in_memory().unwrap();
    let d = date(2026, 3, 2);
    db.upsert_daily_log("alice", &NewDailyRecord::new(d)).unwrap();

    let stored = db.get_daily_log("alice", d).unwrap().unwrap();
    assert_eq!(stored.mood, None);
    assert_eq!(stored.meetings, None);
    assert_eq!(stored.gym, None);
}

#[test]
fn test_user_logs_provider_window() {
    let db = Database::in_memory().unwrap();
    for day in 1..=20 {
        db.upsert_daily_log("alice", &record(date(2026, 3, day), 3, 7.0))
            .unwrap();
    }

    let provider = UserLogs::new(&db, "alice", date(2026, 3, 20));
    // [today - 14, today] spans 15 calendar days
    let logs = provider.normalized_logs(14).unwrap();
    assert_eq!(logs.len(), 15);
    assert_eq!(logs.first().unwrap().date, date(2026, 3, 6));
    assert_eq!(logs.last().unwrap().date, date(2026, 3, 20));

    let week = provider.trailing(7).unwrap();
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].date, date(2026, 3, 14));
    assert!(provider.trailing(0).unwrap().is_empty());
}

#[test]
fn test_user_logs_normalizes_defaults() {
    let db = Database::in_memory().unwrap();
    let d = date(2026, 3, 2);
    db.upsert_daily_log("alice", &NewDailyRecord::new(d)).unwrap();

    let logs = UserLogs::new(&db, "alice", d).normalized_logs(7).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].meetings, 0);
    assert!(!logs[0].gym);
}

#[test]
fn test_record_insight_events_skips_duplicates() {
    let db = Database::in_memory().unwrap();
    let week = date(2026, 3, 2);
    let insights = vec![
        Insight::new(RuleId::SleepMood, "s", vec![], 0.9, Scope::Weekly),
        Insight::new(
            RuleId::EnergyCrash,
            "c",
            vec!["Energy dipped 3 days running".to_string()],
            0.65,
            Scope::Weekly,
        ),
    ];

    assert_eq!(db.record_insight_events("alice", &insights, week).unwrap(), 2);
    // Same period again: nothing new
    assert_eq!(db.record_insight_events("alice", &insights, week).unwrap(), 0);
    // Next week is a new period
    assert_eq!(
        db.record_insight_events("alice", &insights[..1], date(2026, 3, 9))
            .unwrap(),
        1
    );

    let events = db.list_insight_events("alice", 10).unwrap();
    assert_eq!(events.len(), 3);
    let crash = events
        .iter()
        .find(|e| e.insight_key == "energy_crash")
        .unwrap();
    assert_eq!(crash.kind, InsightKind::Prediction);
    assert_eq!(crash.scope, Scope::Weekly);
    assert_eq!(crash.period_start, week);
    assert_eq!(crash.title, "Energy crash risk tomorrow");
    assert_eq!(crash.why, vec!["Energy dipped 3 days running".to_string()]);
}

#[test]
fn test_dedup_keys_on_rule_not_title() {
    let db = Database::in_memory().unwrap();
    let week = date(2026, 3, 2);
    let plain = Insight::new(RuleId::MeetingsEnergy, "m", vec![], 0.8, Scope::Weekly);
    let hedged = plain.clone().with_title("Meetings might be draining your energy");

    assert_eq!(db.record_insight_events("alice", &[plain], week).unwrap(), 1);
    assert_eq!(db.record_insight_events("alice", &[hedged], week).unwrap(), 0);
}

#[test]
fn test_list_insight_events_limit_and_user() {
    let db = Database::in_memory().unwrap();
    let insights: Vec<Insight> = RuleId::BUILTIN
        .iter()
        .map(|r| Insight::new(*r, "x", vec![], 0.8, Scope::Monthly))
        .collect();
    db.record_insight_events("alice", &insights, date(2026, 3, 1))
        .unwrap();

    assert_eq!(db.list_insight_events("alice", 4).unwrap().len(), 4);
    assert!(db.list_insight_events("bob", 10).unwrap().is_empty());

    // Newest first; the last inserted wins ties on timestamp
    let events = db.list_insight_events("alice", 10).unwrap();
    assert_eq!(events[0].insight_key, "energy_crash");
}

#[test]
fn test_insight_feedback_upsert() {
    let db = Database::in_memory().unwrap();
    assert!(db.get_insight_feedback("alice", "sleep_mood").unwrap().is_none());

    db.set_insight_feedback("alice", "sleep_mood", FeedbackAction::Acknowledged)
        .unwrap();
    db.set_insight_feedback("alice", "sleep_mood", FeedbackAction::Dismissed)
        .unwrap();
    db.set_insight_feedback("alice", "work_mood", FeedbackAction::Acknowledged)
        .unwrap();

    let fb = db.get_insight_feedback("alice", "sleep_mood").unwrap().unwrap();
    assert_eq!(fb.action, FeedbackAction::Dismissed);
    assert_eq!(
        db.list_dismissed_insight_keys("alice").unwrap(),
        vec!["sleep_mood".to_string()]
    );
    assert!(db.list_dismissed_insight_keys("bob").unwrap().is_empty());
}
