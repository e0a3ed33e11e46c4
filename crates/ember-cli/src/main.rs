//! Ember CLI - Wellness insights from daily check-ins
//!
//! Usage:
//!   ember init                           Initialize database
//!   ember log --mood 4 --sleep 7.5       Log today
//!   ember import --file logs.csv         Import daily logs
//!   ember insights --scope weekly        Show insights

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use ember_core::{EngineConfig, NewDailyRecord};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    if let Commands::Init = cli.command {
        return commands::cmd_init(&cli.db, cli.no_encrypt);
    }

    let config = EngineConfig::load(cli.config.as_deref()).context("Failed to load engine config")?;
    let db = commands::open_db(&cli.db, cli.no_encrypt)?;
    let today = chrono::Local::now().date_naive();
    let user = cli.user.as_str();

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Log {
            date,
            mood,
            energy,
            sleep,
            work,
            meetings,
            gym,
            notes,
        } => {
            let record = NewDailyRecord {
                mood,
                energy,
                sleep_hours: sleep,
                work_hours: work,
                meetings,
                gym,
                notes,
                ..NewDailyRecord::new(date.unwrap_or(today))
            };
            commands::cmd_log(&db, user, &record)
        }
        Commands::Import { file } => commands::cmd_import(&db, user, &file),
        Commands::Logs { days } => commands::cmd_logs(&db, user, today, days),
        Commands::Insights {
            scope,
            consistent,
            json,
            all,
        } => {
            let opts = commands::InsightsOptions {
                scope: commands::parse_scope(&scope)?,
                consistent,
                json,
                include_dismissed: all,
            };
            commands::cmd_insights(&db, user, &config, today, &opts)
        }
        Commands::Burnout { json } => commands::cmd_burnout(&db, user, &config, today, json),
        Commands::Indices { crash_probability } => {
            commands::cmd_indices(&db, user, &config, today, crash_probability)
        }
        Commands::Summary => commands::cmd_summary(&db, user, &config, today),
        Commands::Events { limit } => commands::cmd_events(&db, user, limit),
        Commands::Feedback { key, action } => commands::cmd_feedback(&db, user, &key, &action),
    }
}
