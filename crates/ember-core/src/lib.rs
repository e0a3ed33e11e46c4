//! Ember Core Library
//!
//! Shared functionality for the Ember wellness tracker:
//! - Database access and migrations for daily records and insight events
//! - Normalizer producing the canonical per-day log view
//! - Rule-based insight engine with confidence, stability and consistency stages
//! - Weekly burnout classification and derived indices
//! - CSV import of daily records

pub mod burnout;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod indices;
pub mod insights;
pub mod models;
pub mod normalize;
pub mod stats;
pub mod summary;

pub use burnout::{assess_weekly_burnout, BurnoutAssessment, BurnoutState};
pub use config::EngineConfig;
pub use db::{Database, UserLogs};
pub use error::{Error, Result};
pub use indices::{
    burnout_risk_score, detect_focus_zone, energy_index, focus_zone_message, FocusZone,
};
pub use insights::{
    crash_probability, Insight, InsightEngine, InsightKind, InsightSink, LogProvider, RuleId,
    Scope,
};
pub use models::{DailyRecord, FeedbackAction, InsightEvent, InsightFeedback, NewDailyRecord};
pub use normalize::{normalize_records, trailing_window, NormalizedLog};
pub use summary::{weekly_summary, WeeklySummary};
