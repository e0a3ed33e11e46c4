//! Daily log command implementations

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use ember_core::{import::parse_daily_csv, Database, NewDailyRecord};

use super::truncate;

pub fn cmd_log(db: &Database, user: &str, record: &NewDailyRecord) -> Result<()> {
    let existed = db.get_daily_log(user, record.date)?.is_some();
    db.upsert_daily_log(user, record)
        .with_context(|| format!("Failed to save log for {}", record.date))?;

    if existed {
        println!("✏️  Updated log for {}", record.date);
    } else {
        println!("✅ Logged {}", record.date);
    }
    Ok(())
}

pub fn cmd_import(db: &Database, user: &str, file: &Path) -> Result<()> {
    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;

    println!("📥 Importing daily logs from {}...", file.display());

    let records = parse_daily_csv(csv_file).context("Failed to parse CSV")?;
    for record in &records {
        db.upsert_daily_log(user, record)
            .with_context(|| format!("Failed to save log for {}", record.date))?;
    }

    tracing::info!(user, imported = records.len(), "Daily logs imported");
    println!("✅ Imported {} daily logs", records.len());
    println!("   Total for {}: {}", user, db.count_daily_logs(user)?);
    Ok(())
}

pub fn cmd_logs(db: &Database, user: &str, today: NaiveDate, days: u32) -> Result<()> {
    let from = today - Duration::days(i64::from(days.max(1)) - 1);
    let logs = db.list_daily_logs(user, from, today)?;

    if logs.is_empty() {
        println!("No logs in the last {} days. Add one with:", days);
        println!("  ember log --mood 4 --energy 3 --sleep 7.5");
        return Ok(());
    }

    let opt_int = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
    let opt_hours = |v: Option<f64>| v.map(|h| format!("{:.1}h", h)).unwrap_or_else(|| "-".into());

    println!();
    println!("📓 Daily Logs ({} to {})", from, today);
    println!("   date       │ mood │ enrg │ sleep │ work  │ mtgs │ gym │ notes");
    println!("   ─────────────────────────────────────────────────────────────────");

    for log in logs {
        println!(
            "   {} │ {:>4} │ {:>4} │ {:>5} │ {:>5} │ {:>4} │ {:>3} │ {}",
            log.date,
            opt_int(log.mood),
            opt_int(log.energy),
            opt_hours(log.sleep_hours),
            opt_hours(log.work_hours),
            opt_int(log.meetings),
            match log.gym {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            },
            truncate(log.notes.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}
