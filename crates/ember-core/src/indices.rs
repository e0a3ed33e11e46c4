//! Derived scalar indices: energy index, burnout risk score, focus zone
//!
//! These are independent of the insight pipeline and of the weekly burnout
//! classifier. The 0-100 risk score here and the classifier's small integer
//! score are separate heuristics and are not meant to agree.

use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedLog;
use crate::stats::mean;

const IDEAL_SLEEP: f64 = 7.5;
/// Work hours at which the workload score bottoms out
const FULL_LOAD_HOURS: f64 = 10.0;
const MEETING_PENALTY: f64 = 0.15;
const MEETING_PENALTY_ABOVE: i64 = 5;

const SLEEP_WEIGHT: f64 = 0.30;
const LOAD_WEIGHT: f64 = 0.25;
const GYM_WEIGHT: f64 = 0.10;
const MOOD_WEIGHT: f64 = 0.15;
const RESILIENCE_WEIGHT: f64 = 0.20;

/// Energy index with no logs at all
pub const NEUTRAL_ENERGY_INDEX: u8 = 50;
/// Risk score when there is too little history
pub const DEFAULT_RISK_SCORE: u8 = 20;
const MIN_RISK_LOGS: usize = 5;
const RISK_WINDOW: usize = 7;

/// Energy on the 0-100 scale when a day has no energy entry
const NEUTRAL_ENERGY_PERCENT: f64 = 50.0;
const HIGH_ENERGY_PERCENT: f64 = 75.0;
const LOW_MEETINGS: i64 = 3;
const FOCUS_RATIO: f64 = 0.6;

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn to_percent(v: f64) -> u8 {
    (clamp_unit(v) * 100.0).round() as u8
}

/// Energy rating (1-5) on a 0-100 scale
pub fn energy_percent(energy: i64) -> f64 {
    energy as f64 * 20.0
}

/// Blend of sleep, workload, gym, mood and resilience for the latest day
///
/// `crash_probability` is clamped to [0, 1]; pass
/// `insights::crash_probability` when no external estimate is available.
pub fn energy_index(logs: &[NormalizedLog], crash_probability: f64) -> u8 {
    let Some(latest) = logs.last() else {
        return NEUTRAL_ENERGY_INDEX;
    };

    let sleep_consistency = mean(logs.iter().filter_map(|l| l.sleep_hours))
        .map(|avg| 1.0 - clamp_unit((avg - IDEAL_SLEEP).abs() / IDEAL_SLEEP))
        .unwrap_or(0.0);
    let sleep_score =
        clamp_unit(latest.sleep_hours.unwrap_or(0.0) / IDEAL_SLEEP) * 0.7 + sleep_consistency * 0.3;

    let load_score = 1.0 - clamp_unit(latest.work_hours.unwrap_or(0.0) / FULL_LOAD_HOURS);
    let meeting_penalty = if latest.meetings > MEETING_PENALTY_ABOVE {
        MEETING_PENALTY
    } else {
        0.0
    };

    let gym_score = if latest.gym { 1.0 } else { 0.5 };
    let mood_score = latest
        .mood
        .map(|m| clamp_unit(m as f64 / 5.0))
        .unwrap_or(0.5);
    let resilience_score = 1.0 - clamp_unit(crash_probability);

    let energy = sleep_score * SLEEP_WEIGHT
        + (load_score - meeting_penalty) * LOAD_WEIGHT
        + gym_score * GYM_WEIGHT
        + mood_score * MOOD_WEIGHT
        + resilience_score * RESILIENCE_WEIGHT;

    to_percent(energy)
}

/// Burnout risk on a 0-100 scale from the trailing seven logs
pub fn burnout_risk_score(logs: &[NormalizedLog], crash_probability: f64) -> u8 {
    if logs.len() < MIN_RISK_LOGS {
        return DEFAULT_RISK_SCORE;
    }
    let recent = &logs[logs.len().saturating_sub(RISK_WINDOW)..];

    let mut risk = 0.0;

    if let Some(avg_sleep) = mean(recent.iter().filter_map(|l| l.sleep_hours)) {
        let sleep_debt = ((IDEAL_SLEEP - avg_sleep) * 7.0).max(0.0);
        if sleep_debt > 5.0 {
            risk += 0.2;
        }
    }

    if let Some(avg_work) = mean(recent.iter().filter_map(|l| l.work_hours)) {
        if avg_work > 8.5 {
            risk += 0.2;
        }
    }

    let as_percent = |l: &NormalizedLog| {
        l.energy
            .map(energy_percent)
            .unwrap_or(NEUTRAL_ENERGY_PERCENT)
    };
    if let (Some(first), Some(last)) = (recent.first(), recent.last()) {
        if as_percent(last) - as_percent(first) < -10.0 {
            risk += 0.3;
        }
    }

    risk += clamp_unit(crash_probability) * 0.3;

    to_percent(risk)
}

/// Relationship between peak-energy days and meeting load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusZone {
    NotEnoughData,
    NoPeakPattern,
    LowMeetingPeaks,
    Irregular,
}

impl FocusZone {
    pub fn message(&self) -> &'static str {
        match self {
            FocusZone::NotEnoughData => "Not enough data yet.",
            FocusZone::NoPeakPattern => "No consistent peak performance pattern yet.",
            FocusZone::LowMeetingPeaks => "High energy strongly correlates with low-meeting days.",
            FocusZone::Irregular => "Peak energy appears irregular. Try reducing meeting load.",
        }
    }
}

pub fn detect_focus_zone(logs: &[NormalizedLog]) -> FocusZone {
    if logs.is_empty() {
        return FocusZone::NotEnoughData;
    }

    let high_energy: Vec<&NormalizedLog> = logs
        .iter()
        .filter(|l| matches!(l.energy, Some(e) if energy_percent(e) > HIGH_ENERGY_PERCENT))
        .collect();
    if high_energy.is_empty() {
        return FocusZone::NoPeakPattern;
    }

    let low_meeting = high_energy
        .iter()
        .filter(|l| l.meetings < LOW_MEETINGS)
        .count();
    if low_meeting as f64 / high_energy.len() as f64 >= FOCUS_RATIO {
        FocusZone::LowMeetingPeaks
    } else {
        FocusZone::Irregular
    }
}

pub fn focus_zone_message(logs: &[NormalizedLog]) -> &'static str {
    detect_focus_zone(logs).message()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn logs(n: i64, f: impl Fn(i64, &mut NormalizedLog)) -> Vec<NormalizedLog> {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        (0..n)
            .map(|i| {
                let mut l = NormalizedLog::empty(start + Duration::days(i));
                f(i, &mut l);
                l
            })
            .collect()
    }

    #[test]
    fn test_energy_index_neutral_without_logs() {
        assert_eq!(energy_index(&[], 0.3), 50);
    }

    #[test]
    fn test_energy_index_ideal_day() {
        let day = logs(3, |_, l| {
            l.sleep_hours = Some(7.5);
            l.work_hours = Some(0.0);
            l.mood = Some(5);
            l.gym = true;
        });
        // 0.30 + 0.25 + 0.10 + 0.15 + 0.20
        assert_eq!(energy_index(&day, 0.0), 100);
    }

    #[test]
    fn test_energy_index_heavy_day() {
        let day = logs(1, |_, l| {
            l.sleep_hours = Some(3.75);
            l.work_hours = Some(12.0);
            l.meetings = 7;
            l.mood = Some(1);
        });
        // sleep: 0.5*0.7 + 0.5*0.3 = 0.5 -> 0.15
        // load: (0 - 0.15) * 0.25 = -0.0375
        // gym: 0.05, mood: 0.2*0.15 = 0.03, resilience: 0.5*0.2 = 0.1
        assert_eq!(energy_index(&day, 0.5), 29);
    }

    #[test]
    fn test_energy_index_clamps_crash_probability() {
        let day = logs(1, |_, l| l.mood = Some(3));
        assert_eq!(energy_index(&day, 7.0), energy_index(&day, 1.0));
        assert_eq!(energy_index(&day, f64::NAN), energy_index(&day, 0.0));
    }

    #[test]
    fn test_risk_default_below_five_logs() {
        assert_eq!(burnout_risk_score(&logs(4, |_, _| {}), 1.0), 20);
    }

    #[test]
    fn test_risk_all_contributors() {
        let week = logs(7, |i, l| {
            l.sleep_hours = Some(5.0);
            l.work_hours = Some(10.0);
            l.energy = Some(if i == 0 { 5 } else { 2 });
        });
        // 0.2 + 0.2 + 0.3 + 0.3
        assert_eq!(burnout_risk_score(&week, 1.0), 100);
        assert_eq!(burnout_risk_score(&week, 0.0), 70);
    }

    #[test]
    fn test_risk_uses_trailing_seven() {
        // Old heavy days fall outside the trailing window
        let history = logs(10, |i, l| {
            l.sleep_hours = Some(if i < 3 { 3.0 } else { 8.0 });
            l.work_hours = Some(if i < 3 { 14.0 } else { 7.0 });
            l.energy = Some(4);
        });
        assert_eq!(burnout_risk_score(&history, 0.0), 0);
    }

    #[test]
    fn test_risk_missing_energy_is_neutral() {
        let week = logs(6, |i, l| {
            l.energy = if i == 0 { None } else { Some(2) };
        });
        // 50 -> 40 is exactly -10: not a decline
        assert_eq!(burnout_risk_score(&week, 0.0), 0);
    }

    #[test]
    fn test_focus_zone() {
        assert_eq!(detect_focus_zone(&[]), FocusZone::NotEnoughData);
        assert_eq!(
            detect_focus_zone(&logs(5, |_, l| l.energy = Some(3))),
            FocusZone::NoPeakPattern
        );

        // 3 of 5 peak days are low-meeting: exactly 60%
        let peaks = logs(5, |i, l| {
            l.energy = Some(5);
            l.meetings = if i < 3 { 1 } else { 6 };
        });
        assert_eq!(detect_focus_zone(&peaks), FocusZone::LowMeetingPeaks);
        assert_eq!(
            focus_zone_message(&peaks),
            "High energy strongly correlates with low-meeting days."
        );

        let busy = logs(5, |i, l| {
            l.energy = Some(4);
            l.meetings = if i < 2 { 0 } else { 4 };
        });
        assert_eq!(detect_focus_zone(&busy), FocusZone::Irregular);
    }
}
