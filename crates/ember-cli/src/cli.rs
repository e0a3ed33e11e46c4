//! CLI argument definitions using clap
//!
//! This module contains the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Ember - Patterns and strain signals from your daily check-ins
#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Local wellness log with rule-based insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "ember.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set EMBER_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// User whose logs are read and written
    #[arg(short, long, default_value = "default", global = true)]
    pub user: String,

    /// Engine config file (defaults to ~/.config/ember/engine.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Add or replace the log for one day
    Log {
        /// Day to log, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Mood, 1-5
        #[arg(short, long)]
        mood: Option<i64>,

        /// Energy, 1-5
        #[arg(short, long)]
        energy: Option<i64>,

        /// Hours slept
        #[arg(short, long)]
        sleep: Option<f64>,

        /// Hours worked
        #[arg(short, long)]
        work: Option<f64>,

        /// Number of meetings
        #[arg(long)]
        meetings: Option<i64>,

        /// Went to the gym (true/false)
        #[arg(long)]
        gym: Option<bool>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Import daily logs from CSV
    Import {
        /// CSV file with header date,mood,energy,sleep_hours,work_hours,meetings,gym,notes
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List recent daily logs
    Logs {
        /// Number of days to show, ending today
        #[arg(short, long, default_value = "14")]
        days: u32,
    },

    /// Show insights for the current week or month
    Insights {
        /// Scope: weekly, monthly
        #[arg(short, long, default_value = "weekly")]
        scope: String,

        /// Tag weekly insights that also hold over the monthly window
        #[arg(long)]
        consistent: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Include insights you have dismissed
        #[arg(short, long)]
        all: bool,
    },

    /// Classify this week's burnout state
    Burnout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show energy index, burnout risk score and focus zone
    Indices {
        /// Crash probability 0-1 (derived from insights if omitted)
        #[arg(long)]
        crash_probability: Option<f64>,
    },

    /// Show this week's averages
    Summary,

    /// List recorded insight events
    Events {
        /// Maximum number of events to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Acknowledge or dismiss an insight
    Feedback {
        /// Insight key (e.g. sleep_mood)
        key: String,

        /// Action: acknowledged, dismissed
        action: String,
    },
}
