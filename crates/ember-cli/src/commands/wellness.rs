//! Burnout, derived index and summary command implementations

use anyhow::Result;
use chrono::NaiveDate;
use ember_core::{
    assess_weekly_burnout, burnout_risk_score, crash_probability, detect_focus_zone,
    energy_index, weekly_summary, BurnoutState, Database, EngineConfig, FocusZone,
    InsightEngine, LogProvider, Scope, UserLogs,
};

use super::fmt_avg;

pub fn cmd_burnout(
    db: &Database,
    user: &str,
    config: &EngineConfig,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let window = UserLogs::new(db, user, today).trailing(config.burnout_window_days)?;
    let assessment = assess_weekly_burnout(&window);

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    let icon = match assessment.state {
        BurnoutState::Balanced => "🟢",
        BurnoutState::Strained => "🟡",
        BurnoutState::Drifting => "🟠",
        BurnoutState::AtRisk => "🔴",
    };

    println!();
    println!("{} Burnout state: {}", icon, assessment.state);
    println!("   {}", assessment.message);
    if !assessment.drivers.is_empty() {
        println!();
        println!("   Drivers (score {}):", assessment.risk_score);
        for driver in &assessment.drivers {
            println!("     - {}", driver);
        }
    }
    Ok(())
}

/// Derived indices over the burnout window
#[derive(Debug, Clone, PartialEq)]
pub struct IndexReport {
    pub energy: u8,
    pub risk: u8,
    pub crash: f64,
    pub zone: FocusZone,
}

/// Compute the derived indices for `user` as of `today`
///
/// The indices see only the trailing burnout window. Without an explicit
/// crash probability, one is derived from the weekly insight set.
pub fn compute_indices(
    db: &Database,
    user: &str,
    config: &EngineConfig,
    today: NaiveDate,
    crash: Option<f64>,
) -> Result<IndexReport> {
    let provider = UserLogs::new(db, user, today);
    let window = provider.trailing(config.burnout_window_days)?;

    let crash = match crash {
        Some(p) => p,
        None => {
            let logs = provider.normalized_logs(config.weekly_lookback_days)?;
            let engine = InsightEngine::with_config(config.clone());
            crash_probability(&engine.compute_insights(&logs, Scope::Weekly))
        }
    };

    Ok(IndexReport {
        energy: energy_index(&window, crash),
        risk: burnout_risk_score(&window, crash),
        crash,
        zone: detect_focus_zone(&window),
    })
}

pub fn cmd_indices(
    db: &Database,
    user: &str,
    config: &EngineConfig,
    today: NaiveDate,
    crash: Option<f64>,
) -> Result<()> {
    let report = compute_indices(db, user, config, today, crash)?;

    println!();
    println!("📊 Derived Indices");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Energy index:        {:>3}/100", report.energy);
    println!("   Burnout risk score:  {:>3}/100", report.risk);
    println!("   Crash probability:   {:>3.0}%", report.crash.clamp(0.0, 1.0) * 100.0);
    println!("   Focus zone:          {}", report.zone.message());
    Ok(())
}

pub fn cmd_summary(
    db: &Database,
    user: &str,
    config: &EngineConfig,
    today: NaiveDate,
) -> Result<()> {
    let window = UserLogs::new(db, user, today).trailing(config.burnout_window_days)?;
    let summary = weekly_summary(&window);

    if summary.records == 0 {
        println!("No logs in the last {} days.", config.burnout_window_days);
        return Ok(());
    }

    println!();
    println!(
        "📅 Last {} days ({} logged)",
        config.burnout_window_days, summary.records
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Mood:    {}", fmt_avg(summary.mood));
    println!("   Energy:  {}", fmt_avg(summary.energy));
    println!("   Sleep:   {} h", fmt_avg(summary.sleep));
    println!("   Work:    {} h", fmt_avg(summary.work));
    println!("   Gym:     {} days", summary.gym_days);
    Ok(())
}
