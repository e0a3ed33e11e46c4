//! Daily wellness record operations

use chrono::{Duration, NaiveDate};
use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::insights::LogProvider;
use crate::models::{DailyRecord, NewDailyRecord};
use crate::normalize::{lookback_start, normalize_records, validate_new_record, NormalizedLog};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, date, mood, energy, sleep_hours, work_hours, meetings, gym, notes,
           created_at
    FROM daily_logs
"#;

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl Database {
    /// Insert or replace the record for `(user_id, record.date)`
    ///
    /// Out-of-range values are rejected with `Error::InvalidData`.
    pub fn upsert_daily_log(&self, user_id: &str, record: &NewDailyRecord) -> Result<i64> {
        validate_new_record(record)?;
        let conn = self.conn()?;

        let date = record.date.format(DATE_FORMAT).to_string();
        conn.execute(
            r#"
            INSERT INTO daily_logs (
                user_id, date, mood, energy, sleep_hours, work_hours, meetings, gym, notes
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, date) DO UPDATE SET
                mood = excluded.mood,
                energy = excluded.energy,
                sleep_hours = excluded.sleep_hours,
                work_hours = excluded.work_hours,
                meetings = excluded.meetings,
                gym = excluded.gym,
                notes = excluded.notes
            "#,
            params![
                user_id,
                date,
                record.mood,
                record.energy,
                record.sleep_hours,
                record.work_hours,
                record.meetings,
                record.gym,
                record.notes
            ],
        )?;

        let id: i64 = conn.query_row(
            "SELECT id FROM daily_logs WHERE user_id = ? AND date = ?",
            params![user_id, date],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Get the record for one day
    pub fn get_daily_log(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyRecord>> {
        let conn = self.conn()?;
        let sql = format!("{} WHERE user_id = ? AND date = ?", SELECT_COLUMNS);

        let record = conn
            .query_row(
                &sql,
                params![user_id, date.format(DATE_FORMAT).to_string()],
                Self::row_to_daily_record,
            )
            .optional()?;
        Ok(record)
    }

    /// List records in `[from, to]`, ascending by date
    pub fn list_daily_logs(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyRecord>> {
        let conn = self.conn()?;
        let sql = format!(
            "{} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date ASC",
            SELECT_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                user_id,
                from.format(DATE_FORMAT).to_string(),
                to.format(DATE_FORMAT).to_string()
            ],
            Self::row_to_daily_record,
        )?;

        let records: std::result::Result<Vec<_>, _> = rows.collect();
        Ok(records?)
    }

    /// Delete the record for one day, returning whether it existed
    pub fn delete_daily_log(&self, user_id: &str, date: NaiveDate) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM daily_logs WHERE user_id = ? AND date = ?",
            params![user_id, date.format(DATE_FORMAT).to_string()],
        )?;
        Ok(deleted > 0)
    }

    pub fn count_daily_logs(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM daily_logs WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub(crate) fn row_to_daily_record(row: &rusqlite::Row) -> rusqlite::Result<DailyRecord> {
        let date_str: String = row.get(2)?;
        let created_at: String = row.get(10)?;

        Ok(DailyRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: parse_date(2, &date_str)?,
            mood: row.get(3)?,
            energy: row.get(4)?,
            sleep_hours: row.get(5)?,
            work_hours: row.get(6)?,
            meetings: row.get(7)?,
            gym: row.get(8)?,
            notes: row.get(9)?,
            created_at: parse_datetime(&created_at),
        })
    }
}

/// One user's logs as seen from a fixed "today"
pub struct UserLogs<'a> {
    db: &'a Database,
    user_id: &'a str,
    as_of: NaiveDate,
}

impl<'a> UserLogs<'a> {
    pub fn new(db: &'a Database, user_id: &'a str, as_of: NaiveDate) -> Self {
        Self { db, user_id, as_of }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Normalized logs for the trailing `days` calendar days, inclusive of today
    pub fn trailing(&self, days: u32) -> Result<Vec<NormalizedLog>> {
        if days == 0 {
            return Ok(Vec::new());
        }
        let from = self.as_of - Duration::days(i64::from(days) - 1);
        let records = self.db.list_daily_logs(self.user_id, from, self.as_of)?;
        Ok(normalize_records(&records))
    }
}

impl LogProvider for UserLogs<'_> {
    /// Normalized logs for `[today - lookback_days, today]`
    fn normalized_logs(&self, lookback_days: u32) -> Result<Vec<NormalizedLog>> {
        let from = lookback_start(self.as_of, lookback_days);
        let records = self.db.list_daily_logs(self.user_id, from, self.as_of)?;
        Ok(normalize_records(&records))
    }
}
