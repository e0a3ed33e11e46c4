//! Built-in insight rules
//!
//! Each rule is a pure function over the normalized window that produces at
//! most one insight. Every rule has a minimum sample size and stays silent
//! below it: with only a handful of days almost any split looks like a
//! pattern.

use crate::normalize::{NormalizedLog, LOW_ENERGY};
use crate::stats::{mean, variance};

use super::types::{Insight, RuleId, Scope};

/// Minimum samples for the correlation rules
const MIN_VALID_DAYS: usize = 5;
/// Minimum samples on each side of a mean split
const MIN_PER_SIDE: usize = 2;
/// Minimum gym and non-gym days for the stability comparison
const MIN_GYM_GROUP: usize = 3;
/// Smallest mean difference (on the 1-5 scale) worth reporting
const MIN_EFFECT: f64 = 0.5;
/// Days counted as "recent" by the crash forecast
const CRASH_RECENT_DAYS: usize = 3;
/// Hours below mean sleep that count as a short night
const SHORT_SLEEP_MARGIN: f64 = 0.75;
/// Fixed raw confidence of the crash forecast
const CRASH_CONFIDENCE: f64 = 0.75;

/// Confidence that grows with sample count, saturating at two weeks
fn sample_confidence(samples: usize) -> f64 {
    (samples as f64 / 14.0).min(1.0)
}

/// A (split value, outcome) sample
#[derive(Debug, Clone, Copy)]
struct Sample {
    split: f64,
    outcome: f64,
}

/// Outcome means above and at-or-below the mean of the split variable
struct MeanSplit {
    split_mean: f64,
    high: f64,
    low: f64,
}

fn split_at_mean(samples: &[Sample]) -> Option<MeanSplit> {
    let split_mean = mean(samples.iter().map(|s| s.split))?;

    let (high, low): (Vec<Sample>, Vec<Sample>) =
        samples.iter().copied().partition(|s| s.split > split_mean);

    if high.len() < MIN_PER_SIDE || low.len() < MIN_PER_SIDE {
        return None;
    }

    Some(MeanSplit {
        split_mean,
        high: mean(high.iter().map(|s| s.outcome))?,
        low: mean(low.iter().map(|s| s.outcome))?,
    })
}

/// Sleep -> mood: mood differs between above- and below-average sleep days
pub fn sleep_vs_mood(logs: &[NormalizedLog], scope: Scope) -> Option<Insight> {
    let samples: Vec<Sample> = logs
        .iter()
        .filter_map(|d| {
            Some(Sample {
                split: d.sleep_hours?,
                outcome: d.mood? as f64,
            })
        })
        .collect();
    if samples.len() < MIN_VALID_DAYS {
        return None;
    }

    let split = split_at_mean(&samples)?;
    let diff = split.high - split.low;
    if diff.abs() < MIN_EFFECT {
        return None;
    }

    let (summary, direction) = if diff > 0.0 {
        (
            "On days you sleep more than usual, your mood tends to be better.",
            "Mood higher on higher-sleep days",
        )
    } else {
        (
            "On days you sleep more than usual, your mood tends to be lower.",
            "Mood lower on higher-sleep days",
        )
    };

    Some(Insight::new(
        RuleId::SleepMood,
        summary,
        vec![
            format!("Based on {} days", samples.len()),
            format!("Average sleep: {:.1}h", split.split_mean),
            direction.to_string(),
        ],
        sample_confidence(samples.len()),
        scope,
    ))
}

/// Meetings -> energy: lighter meeting days leave more energy
pub fn meetings_vs_energy(logs: &[NormalizedLog], scope: Scope) -> Option<Insight> {
    let samples: Vec<Sample> = logs
        .iter()
        .filter_map(|d| {
            Some(Sample {
                split: d.meetings as f64,
                outcome: d.energy? as f64,
            })
        })
        .collect();
    if samples.len() < MIN_VALID_DAYS {
        return None;
    }

    let split = split_at_mean(&samples)?;
    if split.low - split.high < MIN_EFFECT {
        return None;
    }

    Some(Insight::new(
        RuleId::MeetingsEnergy,
        "Days with fewer meetings tend to leave you with more energy.",
        vec![
            format!("Average meetings: {:.1}", split.split_mean),
            "Energy lower on high-meeting days".to_string(),
        ],
        sample_confidence(samples.len()),
        scope,
    ))
}

/// Gym -> mood stability: mood varies less on gym days
pub fn gym_vs_mood_stability(logs: &[NormalizedLog], scope: Scope) -> Option<Insight> {
    let gym: Vec<f64> = logs
        .iter()
        .filter(|d| d.gym)
        .filter_map(|d| d.mood.map(|m| m as f64))
        .collect();
    let non_gym: Vec<f64> = logs
        .iter()
        .filter(|d| !d.gym)
        .filter_map(|d| d.mood.map(|m| m as f64))
        .collect();

    if gym.len() < MIN_GYM_GROUP || non_gym.len() < MIN_GYM_GROUP {
        return None;
    }
    if variance(&gym)? >= variance(&non_gym)? {
        return None;
    }

    Some(Insight::new(
        RuleId::GymMoodStability,
        "On days you go to the gym, your mood fluctuates less.",
        vec![format!(
            "Compared {} gym days vs {} non-gym days",
            gym.len(),
            non_gym.len()
        )],
        (gym.len() as f64 / 10.0).min(1.0),
        scope,
    ))
}

/// Work hours -> mood: longer workdays come with lower mood
pub fn work_hours_vs_mood(logs: &[NormalizedLog], scope: Scope) -> Option<Insight> {
    let samples: Vec<Sample> = logs
        .iter()
        .filter_map(|d| {
            Some(Sample {
                split: d.work_hours?,
                outcome: d.mood? as f64,
            })
        })
        .collect();
    if samples.len() < MIN_VALID_DAYS {
        return None;
    }

    let split = split_at_mean(&samples)?;
    if split.low - split.high < MIN_EFFECT {
        return None;
    }

    Some(Insight::new(
        RuleId::WorkMood,
        "On days you work longer than usual, your mood tends to be lower.",
        vec![
            format!("Based on {} days with work and mood data", samples.len()),
            format!("Your average workday is {:.1} hours", split.split_mean),
            "Mood is lower on longer workdays".to_string(),
        ],
        sample_confidence(samples.len()),
        scope,
    ))
}

/// Sleep -> next-day energy
///
/// Pairs each record with the next logged record, whatever the calendar gap.
pub fn sleep_lag_vs_energy(logs: &[NormalizedLog], scope: Scope) -> Option<Insight> {
    let samples: Vec<Sample> = logs
        .windows(2)
        .filter_map(|pair| {
            Some(Sample {
                split: pair[0].sleep_hours?,
                outcome: pair[1].energy? as f64,
            })
        })
        .collect();
    if samples.len() < MIN_VALID_DAYS {
        return None;
    }

    let split = split_at_mean(&samples)?;
    if split.high - split.low < MIN_EFFECT {
        return None;
    }

    Some(Insight::new(
        RuleId::SleepLagEnergy,
        "When you sleep more than usual, your energy tends to be higher the next day.",
        vec![
            format!("Based on {} day-to-day transitions", samples.len()),
            "Higher sleep days lead to higher next-day energy".to_string(),
        ],
        sample_confidence(samples.len()),
        scope,
    ))
}

/// Forecast: short sleep and low energy on most of the last three days
pub fn predict_energy_crash(logs: &[NormalizedLog], scope: Scope) -> Option<Insight> {
    if logs.len() < MIN_VALID_DAYS {
        return None;
    }

    let sleep: Vec<f64> = logs.iter().filter_map(|d| d.sleep_hours).collect();
    if sleep.len() < MIN_VALID_DAYS {
        return None;
    }
    let avg_sleep = mean(sleep)?;

    let recent = &logs[logs.len().saturating_sub(CRASH_RECENT_DAYS)..];
    let low_sleep = recent
        .iter()
        .filter(|d| matches!(d.sleep_hours, Some(s) if s < avg_sleep - SHORT_SLEEP_MARGIN))
        .count();
    let low_energy = recent
        .iter()
        .filter(|d| matches!(d.energy, Some(e) if e <= LOW_ENERGY))
        .count();

    if low_sleep < 2 || low_energy < 2 {
        return None;
    }

    Some(Insight::new(
        RuleId::EnergyCrash,
        "Based on the last few days, you may feel noticeably low energy tomorrow.",
        vec![
            "Sleep has been below your usual baseline".to_string(),
            "Energy levels have been low for multiple days".to_string(),
            "Similar patterns in the past often lead to fatigue".to_string(),
        ],
        CRASH_CONFIDENCE,
        scope,
    ))
}
