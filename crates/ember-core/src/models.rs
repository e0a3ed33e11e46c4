//! Domain models for Ember

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::insights::{InsightKind, Scope};

/// A stored daily wellness record (one per user per calendar day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    /// 1-5
    pub mood: Option<i64>,
    /// 1-5
    pub energy: Option<i64>,
    pub sleep_hours: Option<f64>,
    pub work_hours: Option<f64>,
    /// Absent on legacy rows; the normalizer defaults it to 0
    pub meetings: Option<i64>,
    /// Absent on legacy rows; the normalizer defaults it to false
    pub gym: Option<bool>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A daily record to insert or replace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDailyRecord {
    pub date: NaiveDate,
    pub mood: Option<i64>,
    pub energy: Option<i64>,
    pub sleep_hours: Option<f64>,
    pub work_hours: Option<f64>,
    pub meetings: Option<i64>,
    pub gym: Option<bool>,
    pub notes: Option<String>,
}

impl NewDailyRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ..Default::default()
        }
    }
}

/// User reaction to a surfaced insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Acknowledged,
    Dismissed,
}

impl FeedbackAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acknowledged => "acknowledged",
            Self::Dismissed => "dismissed",
        }
    }
}

impl std::str::FromStr for FeedbackAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "acknowledged" | "ack" => Ok(Self::Acknowledged),
            "dismissed" | "dismiss" => Ok(Self::Dismissed),
            _ => Err(format!("Unknown feedback action: {}", s)),
        }
    }
}

impl std::fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored feedback for one insight key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightFeedback {
    pub user_id: String,
    pub insight_key: String,
    pub action: FeedbackAction,
    pub updated_at: DateTime<Utc>,
}

/// A persisted record that an insight was surfaced to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightEvent {
    pub id: i64,
    pub user_id: String,
    pub insight_key: String,
    pub title: String,
    pub scope: Scope,
    pub confidence: f64,
    pub kind: InsightKind,
    pub period_start: NaiveDate,
    /// Justification strings at the time of surfacing
    pub why: Vec<String>,
    pub created_at: DateTime<Utc>,
}
