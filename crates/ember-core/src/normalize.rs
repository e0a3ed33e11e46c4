//! Normalizer: canonical in-memory view of stored daily records
//!
//! Every engine invocation builds a fresh `NormalizedLog` sequence from the
//! records fetched for the requested window. Missing days stay missing (no
//! gap filling), `meetings` and `gym` are always present, and malformed
//! records are dropped individually rather than failing the batch.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{DailyRecord, NewDailyRecord};

/// Longest plausible sleep or work entry for one day
const MAX_DAILY_HOURS: f64 = 24.0;
/// Energy at or below this is a low-energy day
pub const LOW_ENERGY: i64 = 2;

/// Immutable per-day view consumed by the analytics engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedLog {
    pub date: NaiveDate,
    pub mood: Option<i64>,
    pub energy: Option<i64>,
    pub sleep_hours: Option<f64>,
    pub work_hours: Option<f64>,
    pub meetings: i64,
    pub gym: bool,
}

impl NormalizedLog {
    /// A log for `date` with every optional field absent
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            mood: None,
            energy: None,
            sleep_hours: None,
            work_hours: None,
            meetings: 0,
            gym: false,
        }
    }
}

/// Check the value ranges of a daily record
pub fn validate_fields(
    mood: Option<i64>,
    energy: Option<i64>,
    sleep_hours: Option<f64>,
    work_hours: Option<f64>,
    meetings: Option<i64>,
) -> Result<()> {
    if let Some(m) = mood {
        if !(1..=5).contains(&m) {
            return Err(Error::InvalidData(format!("mood must be 1-5, got {}", m)));
        }
    }
    if let Some(e) = energy {
        if !(1..=5).contains(&e) {
            return Err(Error::InvalidData(format!("energy must be 1-5, got {}", e)));
        }
    }
    for (name, hours) in [("sleep_hours", sleep_hours), ("work_hours", work_hours)] {
        if let Some(h) = hours {
            if !h.is_finite() || !(0.0..=MAX_DAILY_HOURS).contains(&h) {
                return Err(Error::InvalidData(format!(
                    "{} must be between 0 and 24, got {}",
                    name, h
                )));
            }
        }
    }
    if let Some(n) = meetings {
        if n < 0 {
            return Err(Error::InvalidData(format!(
                "meetings must be non-negative, got {}",
                n
            )));
        }
    }
    Ok(())
}

/// Validate a record before it is written
pub fn validate_new_record(record: &NewDailyRecord) -> Result<()> {
    validate_fields(
        record.mood,
        record.energy,
        record.sleep_hours,
        record.work_hours,
        record.meetings,
    )
}

fn normalize_one(record: &DailyRecord) -> Result<NormalizedLog> {
    validate_fields(
        record.mood,
        record.energy,
        record.sleep_hours,
        record.work_hours,
        record.meetings,
    )?;

    Ok(NormalizedLog {
        date: record.date,
        mood: record.mood,
        energy: record.energy,
        sleep_hours: record.sleep_hours,
        work_hours: record.work_hours,
        meetings: record.meetings.unwrap_or(0),
        gym: record.gym.unwrap_or(false),
    })
}

/// Map stored records to the canonical log sequence, ascending by date
///
/// Malformed records are excluded with a warning. If storage ever hands back
/// two records for the same day, the first one seen wins.
pub fn normalize_records(records: &[DailyRecord]) -> Vec<NormalizedLog> {
    let mut logs: Vec<NormalizedLog> = Vec::with_capacity(records.len());

    for record in records {
        match normalize_one(record) {
            Ok(log) => logs.push(log),
            Err(e) => {
                warn!(
                    record_id = record.id,
                    date = %record.date,
                    error = %e,
                    "Dropping malformed daily record"
                );
            }
        }
    }

    logs.sort_by_key(|l| l.date);
    let before = logs.len();
    logs.dedup_by_key(|l| l.date);
    if logs.len() != before {
        warn!(
            duplicates = before - logs.len(),
            "Dropped duplicate daily records"
        );
    }

    debug!(
        input = records.len(),
        normalized = logs.len(),
        "Normalized daily records"
    );
    logs
}

/// First date of a lookback window ending on `as_of`
pub fn lookback_start(as_of: NaiveDate, lookback_days: u32) -> NaiveDate {
    as_of - Duration::days(i64::from(lookback_days))
}

/// Logs from the trailing `days` calendar days, inclusive of `as_of`
pub fn trailing_window(logs: &[NormalizedLog], as_of: NaiveDate, days: u32) -> Vec<NormalizedLog> {
    if days == 0 {
        return Vec::new();
    }
    let start = as_of - Duration::days(i64::from(days) - 1);
    logs.iter()
        .filter(|l| l.date >= start && l.date <= as_of)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn record(id: i64, day: u32) -> DailyRecord {
        DailyRecord {
            id,
            user_id: "u1".to_string(),
            date: date(day),
            mood: Some(3),
            energy: Some(3),
            sleep_hours: Some(7.0),
            work_hours: Some(8.0),
            meetings: None,
            gym: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_defaults_meetings_and_gym() {
        let logs = normalize_records(&[record(1, 1)]);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].meetings, 0);
        assert!(!logs[0].gym);
        assert_eq!(logs[0].sleep_hours, Some(7.0));
    }

    #[test]
    fn test_orders_ascending_without_gap_filling() {
        let logs = normalize_records(&[record(1, 9), record(2, 2), record(3, 5)]);
        let days: Vec<_> = logs.iter().map(|l| l.date).collect();
        assert_eq!(days, vec![date(2), date(5), date(9)]);
    }

    #[test]
    fn test_drops_only_malformed_records() {
        let mut negative_work = record(2, 2);
        negative_work.work_hours = Some(-1.0);
        let mut bad_mood = record(3, 3);
        bad_mood.mood = Some(9);
        let mut nan_sleep = record(4, 4);
        nan_sleep.sleep_hours = Some(f64::NAN);

        let logs = normalize_records(&[record(1, 1), negative_work, bad_mood, nan_sleep]);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].date, date(1));
    }

    #[test]
    fn test_duplicate_day_keeps_first() {
        let mut second = record(2, 1);
        second.mood = Some(5);
        let logs = normalize_records(&[record(1, 1), second]);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].mood, Some(3));
    }

    #[test]
    fn test_validate_new_record() {
        let mut rec = NewDailyRecord::new(date(1));
        assert!(validate_new_record(&rec).is_ok());
        rec.meetings = Some(-2);
        assert!(matches!(
            validate_new_record(&rec),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_trailing_window_is_inclusive() {
        let logs: Vec<_> = (1..=10).map(|d| NormalizedLog::empty(date(d))).collect();
        let window = trailing_window(&logs, date(10), 7);
        assert_eq!(window.len(), 7);
        assert_eq!(window[0].date, date(4));
        assert!(trailing_window(&logs, date(10), 0).is_empty());
    }

    #[test]
    fn test_lookback_start() {
        assert_eq!(lookback_start(date(20), 14), date(6));
    }
}
