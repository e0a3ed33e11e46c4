//! CSV import of daily wellness records
//!
//! Expected header: `date,mood,energy,sleep_hours,work_hours,meetings,gym,notes`.
//! Every column but `date` may be left empty.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::NewDailyRecord;
use crate::normalize::validate_new_record;

/// Column layout of an import file
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    mood: Option<i64>,
    energy: Option<i64>,
    sleep_hours: Option<f64>,
    work_hours: Option<f64>,
    meetings: Option<i64>,
    gym: Option<String>,
    notes: Option<String>,
}

/// Parse daily records from CSV
///
/// The first bad row aborts the import with `Error::Import` naming its line.
pub fn parse_daily_csv<R: Read>(reader: R) -> Result<Vec<NewDailyRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let parsed: CsvRow = row
            .deserialize(Some(&headers))
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;
        let record = row_to_record(parsed)
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;
        validate_new_record(&record).map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;

        records.push(record);
    }

    debug!(count = records.len(), "Parsed daily records from CSV");
    Ok(records)
}

fn row_to_record(row: CsvRow) -> std::result::Result<NewDailyRecord, String> {
    let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
        .map_err(|_| format!("Unable to parse date: {}", row.date))?;
    let gym = row.gym.as_deref().map(parse_bool).transpose()?;

    Ok(NewDailyRecord {
        date,
        mood: row.mood,
        energy: row.energy,
        sleep_hours: row.sleep_hours,
        work_hours: row.work_hours,
        meetings: row.meetings,
        gym,
        notes: row.notes.filter(|n| !n.is_empty()),
    })
}

fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(format!("Unable to parse gym flag: {}", s)),
    }
}
