//! Per-field averages over a window of logs

use serde::Serialize;

use crate::normalize::NormalizedLog;
use crate::stats::mean;

/// Averages of the core wellness fields; each is absent with no samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub records: usize,
    pub mood: Option<f64>,
    pub energy: Option<f64>,
    pub sleep: Option<f64>,
    pub work: Option<f64>,
    pub gym_days: usize,
}

pub fn weekly_summary(logs: &[NormalizedLog]) -> WeeklySummary {
    WeeklySummary {
        records: logs.len(),
        mood: mean(logs.iter().filter_map(|l| l.mood.map(|m| m as f64))),
        energy: mean(logs.iter().filter_map(|l| l.energy.map(|e| e as f64))),
        sleep: mean(logs.iter().filter_map(|l| l.sleep_hours)),
        work: mean(logs.iter().filter_map(|l| l.work_hours)),
        gym_days: logs.iter().filter(|l| l.gym).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_summary_ignores_missing_values() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut a = NormalizedLog::empty(d);
        a.mood = Some(2);
        a.sleep_hours = Some(6.0);
        a.gym = true;
        let mut b = NormalizedLog::empty(d.succ_opt().unwrap());
        b.mood = Some(4);

        let s = weekly_summary(&[a, b]);
        assert_eq!(s.records, 2);
        assert_eq!(s.mood, Some(3.0));
        assert_eq!(s.sleep, Some(6.0));
        assert_eq!(s.work, None);
        assert_eq!(s.energy, None);
        assert_eq!(s.gym_days, 1);
    }

    #[test]
    fn test_empty_summary() {
        let s = weekly_summary(&[]);
        assert_eq!(s.records, 0);
        assert_eq!(s.mood, None);
    }
}
