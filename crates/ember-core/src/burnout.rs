//! Weekly burnout state classifier
//!
//! Scores a trailing seven-day window against four independent strain
//! drivers and maps the total to one of four states. Nothing carries over
//! between calls; each assessment is computed from the window alone.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::normalize::{NormalizedLog, LOW_ENERGY};
use crate::stats::mean;

/// Fewer records than this yields the "not enough data" assessment
pub const MIN_BURNOUT_RECORDS: usize = 3;

const NOT_ENOUGH_DATA: &str = "Not enough data this week to assess strain.";
const SHORT_SLEEP_MARGIN: f64 = 0.75;
const HIGH_WORK_HOURS: f64 = 9.0;
const LOW_MOOD: f64 = 3.0;
const HEAVY_MEETINGS: i64 = 5;

pub const DRIVER_LOW_SLEEP: &str = "Sleep below weekly baseline";
pub const DRIVER_WORK_MOOD: &str = "High work hours with lower mood";
pub const DRIVER_LOW_ENERGY: &str = "Multiple low-energy days";
pub const DRIVER_MEETING_LOAD: &str = "Meeting load affecting energy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnoutState {
    Balanced,
    Strained,
    Drifting,
    AtRisk,
}

impl BurnoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BurnoutState::Balanced => "balanced",
            BurnoutState::Strained => "strained",
            BurnoutState::Drifting => "drifting",
            BurnoutState::AtRisk => "at_risk",
        }
    }

    /// Map an accumulated risk score to a state
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 4 => BurnoutState::AtRisk,
            3 => BurnoutState::Drifting,
            2 => BurnoutState::Strained,
            _ => BurnoutState::Balanced,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BurnoutState::Balanced => "No strain signals detected this week.",
            BurnoutState::Strained => "Pressure appears to be building this week.",
            BurnoutState::Drifting => "Strain signals are aligning across multiple areas.",
            BurnoutState::AtRisk => "Recent patterns suggest elevated burnout risk.",
        }
    }
}

impl fmt::Display for BurnoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a weekly burnout assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnoutAssessment {
    pub state: BurnoutState,
    /// Sum of triggered driver weights; may exceed 5
    pub risk_score: u32,
    pub message: String,
    /// Triggered drivers, in evaluation order
    pub drivers: Vec<String>,
}

impl BurnoutAssessment {
    fn not_enough_data() -> Self {
        Self {
            state: BurnoutState::Balanced,
            risk_score: 0,
            message: NOT_ENOUGH_DATA.to_string(),
            drivers: Vec::new(),
        }
    }
}

fn low_sleep_driver(logs: &[NormalizedLog]) -> bool {
    let sleep: Vec<f64> = logs.iter().filter_map(|l| l.sleep_hours).collect();
    if sleep.len() < MIN_BURNOUT_RECORDS {
        return false;
    }
    let Some(avg) = mean(sleep.iter().copied()) else {
        return false;
    };
    sleep.iter().filter(|s| **s < avg - SHORT_SLEEP_MARGIN).count() >= 2
}

fn work_mood_driver(logs: &[NormalizedLog]) -> bool {
    let mood: Vec<f64> = logs.iter().filter_map(|l| l.mood.map(|m| m as f64)).collect();
    let work: Vec<f64> = logs.iter().filter_map(|l| l.work_hours).collect();
    if mood.len() < MIN_BURNOUT_RECORDS || work.len() < MIN_BURNOUT_RECORDS {
        return false;
    }
    match (mean(work), mean(mood)) {
        (Some(avg_work), Some(avg_mood)) => avg_work > HIGH_WORK_HOURS && avg_mood < LOW_MOOD,
        _ => false,
    }
}

fn low_energy_driver(logs: &[NormalizedLog]) -> bool {
    logs.iter()
        .filter(|l| matches!(l.energy, Some(e) if e <= LOW_ENERGY))
        .count()
        >= 2
}

fn meeting_load_driver(logs: &[NormalizedLog]) -> bool {
    let heavy: Vec<&NormalizedLog> = logs.iter().filter(|l| l.meetings >= HEAVY_MEETINGS).collect();
    let drained = heavy
        .iter()
        .filter(|l| matches!(l.energy, Some(e) if e <= LOW_ENERGY))
        .count();
    heavy.len() >= 2 && drained >= 2
}

/// Assess burnout state over a trailing seven-day window
///
/// The caller restricts `logs` to the window (see `normalize::trailing_window`).
pub fn assess_weekly_burnout(logs: &[NormalizedLog]) -> BurnoutAssessment {
    if logs.len() < MIN_BURNOUT_RECORDS {
        return BurnoutAssessment::not_enough_data();
    }

    let drivers: [(fn(&[NormalizedLog]) -> bool, u32, &str); 4] = [
        (low_sleep_driver, 1, DRIVER_LOW_SLEEP),
        (work_mood_driver, 1, DRIVER_WORK_MOOD),
        (low_energy_driver, 2, DRIVER_LOW_ENERGY),
        (meeting_load_driver, 1, DRIVER_MEETING_LOAD),
    ];

    let mut risk_score = 0;
    let mut triggered = Vec::new();
    for (check, weight, label) in drivers {
        if check(logs) {
            risk_score += weight;
            triggered.push(label.to_string());
        }
    }

    let state = BurnoutState::from_score(risk_score);
    tracing::debug!(
        records = logs.len(),
        risk_score,
        state = state.as_str(),
        "Burnout assessment complete"
    );

    BurnoutAssessment {
        state,
        risk_score,
        message: state.message().to_string(),
        drivers: triggered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn week(f: impl Fn(usize, &mut NormalizedLog)) -> Vec<NormalizedLog> {
        let start = NaiveDate::from_ymd_opt(2026, 4, 6).unwrap();
        (0..7)
            .map(|i| {
                let mut l = NormalizedLog::empty(start + Duration::days(i as i64));
                l.mood = Some(4);
                l.energy = Some(4);
                l.sleep_hours = Some(7.5);
                l.work_hours = Some(8.0);
                l.meetings = 1;
                f(i, &mut l);
                l
            })
            .collect()
    }

    #[test]
    fn test_not_enough_data() {
        let logs: Vec<_> = week(|_, _| {}).into_iter().take(2).collect();
        let a = assess_weekly_burnout(&logs);
        assert_eq!(a.state, BurnoutState::Balanced);
        assert_eq!(a.risk_score, 0);
        assert!(a.message.to_lowercase().contains("not enough data"));
        assert!(a.drivers.is_empty());
    }

    #[test]
    fn test_quiet_week_is_balanced() {
        let a = assess_weekly_burnout(&week(|_, _| {}));
        assert_eq!(a.state, BurnoutState::Balanced);
        assert_eq!(a.risk_score, 0);
        assert_eq!(a.message, "No strain signals detected this week.");
    }

    #[test]
    fn test_work_mood_alone_stays_balanced() {
        let a = assess_weekly_burnout(&week(|_, l| {
            l.work_hours = Some(10.0);
            l.mood = Some(2);
        }));
        assert_eq!(a.risk_score, 1);
        assert_eq!(a.state, BurnoutState::Balanced);
        assert_eq!(a.drivers, vec![DRIVER_WORK_MOOD.to_string()]);
    }

    #[test]
    fn test_low_energy_alone_is_strained() {
        let a = assess_weekly_burnout(&week(|i, l| {
            if i < 2 {
                l.energy = Some(2);
            }
        }));
        assert_eq!(a.risk_score, 2);
        assert_eq!(a.state, BurnoutState::Strained);
    }

    #[test]
    fn test_low_sleep_driver() {
        let a = assess_weekly_burnout(&week(|i, l| {
            if i >= 5 {
                l.sleep_hours = Some(5.0);
            }
        }));
        assert_eq!(a.drivers, vec![DRIVER_LOW_SLEEP.to_string()]);
        assert_eq!(a.risk_score, 1);
    }

    #[test]
    fn test_all_drivers_at_risk_in_order() {
        let a = assess_weekly_burnout(&week(|i, l| {
            l.work_hours = Some(10.5);
            l.mood = Some(2);
            if i >= 4 {
                l.sleep_hours = Some(5.0);
                l.energy = Some(1);
                l.meetings = 6;
            }
        }));
        assert_eq!(a.risk_score, 5);
        assert_eq!(a.state, BurnoutState::AtRisk);
        assert_eq!(
            a.drivers,
            vec![
                DRIVER_LOW_SLEEP.to_string(),
                DRIVER_WORK_MOOD.to_string(),
                DRIVER_LOW_ENERGY.to_string(),
                DRIVER_MEETING_LOAD.to_string(),
            ]
        );
    }

    #[test]
    fn test_meeting_load_needs_drained_heavy_days() {
        // Heavy meetings but energy fine
        let a = assess_weekly_burnout(&week(|i, l| {
            if i < 3 {
                l.meetings = 6;
            }
        }));
        assert!(!a.drivers.contains(&DRIVER_MEETING_LOAD.to_string()));
    }

    #[test]
    fn test_adding_driver_never_lowers_score() {
        let base = assess_weekly_burnout(&week(|_, _| {}));
        let patterns: [fn(usize, &mut NormalizedLog); 4] = [
            |i, l| {
                if i < 2 {
                    l.sleep_hours = Some(4.0);
                }
            },
            |_, l| {
                l.work_hours = Some(11.0);
                l.mood = Some(1);
            },
            |i, l| {
                if i < 2 {
                    l.energy = Some(1);
                }
            },
            |i, l| {
                if i < 2 {
                    l.meetings = 7;
                    l.energy = Some(2);
                }
            },
        ];
        for pattern in patterns {
            let a = assess_weekly_burnout(&week(pattern));
            assert!(a.risk_score > base.risk_score);
        }
    }

    #[test]
    fn test_state_mapping() {
        assert_eq!(BurnoutState::from_score(0), BurnoutState::Balanced);
        assert_eq!(BurnoutState::from_score(1), BurnoutState::Balanced);
        assert_eq!(BurnoutState::from_score(2), BurnoutState::Strained);
        assert_eq!(BurnoutState::from_score(3), BurnoutState::Drifting);
        assert_eq!(BurnoutState::from_score(6), BurnoutState::AtRisk);
    }

    #[test]
    fn test_serializes_state_snake_case() {
        let a = assess_weekly_burnout(&week(|_, _| {}));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["state"], "balanced");
        assert_eq!(json["risk_score"], 0);
    }
}
