//! Core types for the insight pipeline

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::config::EngineConfig;

/// Weight applied to rules with no registered weight
pub const DEFAULT_CONFIDENCE_WEIGHT: f64 = 0.85;

/// Time scope an insight was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Weekly,
    Monthly,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Weekly => "weekly",
            Scope::Monthly => "monthly",
        }
    }

    /// How many days of history the scope looks back over
    pub fn lookback_days(&self, config: &EngineConfig) -> u32 {
        match self {
            Scope::Weekly => config.weekly_lookback_days,
            Scope::Monthly => config.monthly_lookback_days,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" | "week" => Ok(Scope::Weekly),
            "monthly" | "month" => Ok(Scope::Monthly),
            _ => Err(format!("Unknown scope: {}", s)),
        }
    }
}

/// Whether an insight describes a past pattern or forecasts one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Insight,
    Prediction,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Insight => "insight",
            InsightKind::Prediction => "prediction",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insight" => Ok(InsightKind::Insight),
            "prediction" => Ok(InsightKind::Prediction),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Stable identity of a rule, independent of its display wording
///
/// Every pipeline stage after the rules themselves (weighting, stability,
/// consistency, persistence) matches insights by this identifier. Titles are
/// free to change, or be softened, without breaking those joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    SleepMood,
    MeetingsEnergy,
    GymMoodStability,
    WorkMood,
    SleepLagEnergy,
    EnergyCrash,
    /// Externally registered rule, keyed by its own stable string
    Custom(&'static str),
}

impl RuleId {
    /// The built-in rules, in evaluation order
    pub const BUILTIN: [RuleId; 6] = [
        RuleId::SleepMood,
        RuleId::MeetingsEnergy,
        RuleId::GymMoodStability,
        RuleId::WorkMood,
        RuleId::SleepLagEnergy,
        RuleId::EnergyCrash,
    ];

    /// Persistence key
    pub fn key(&self) -> &'static str {
        match self {
            RuleId::SleepMood => "sleep_mood",
            RuleId::MeetingsEnergy => "meetings_energy",
            RuleId::GymMoodStability => "gym_mood_stability",
            RuleId::WorkMood => "work_mood",
            RuleId::SleepLagEnergy => "sleep_lag_energy",
            RuleId::EnergyCrash => "energy_crash",
            RuleId::Custom(key) => key,
        }
    }

    /// Display title for built-in rules
    pub fn title(&self) -> &'static str {
        match self {
            RuleId::SleepMood => "Sleep impacts your mood",
            RuleId::MeetingsEnergy => "Meetings drain your energy",
            RuleId::GymMoodStability => "Gym days stabilize your mood",
            RuleId::WorkMood => "Long workdays affect your mood",
            RuleId::SleepLagEnergy => "Sleep affects your next-day energy",
            RuleId::EnergyCrash => "Energy crash risk tomorrow",
            RuleId::Custom(key) => key,
        }
    }

    /// Registered confidence weight, if any
    pub fn weight(&self) -> Option<f64> {
        match self {
            RuleId::SleepMood => Some(1.0),
            RuleId::MeetingsEnergy => Some(0.9),
            RuleId::GymMoodStability => Some(0.8),
            RuleId::WorkMood => Some(0.9),
            RuleId::SleepLagEnergy => Some(1.0),
            RuleId::EnergyCrash => Some(0.85),
            RuleId::Custom(_) => None,
        }
    }

    pub fn kind(&self) -> InsightKind {
        match self {
            RuleId::EnergyCrash => InsightKind::Prediction,
            _ => InsightKind::Insight,
        }
    }

    /// Look up a rule by its persistence key
    pub fn from_key(key: &str) -> Option<RuleId> {
        RuleId::BUILTIN.iter().copied().find(|id| id.key() == key)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Weight used by confidence normalization
pub fn confidence_weight(rule: RuleId) -> f64 {
    rule.weight().unwrap_or(DEFAULT_CONFIDENCE_WEIGHT)
}

/// A pattern surfaced to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    /// Identity key used across pipeline stages
    pub rule: RuleId,
    pub title: String,
    pub summary: String,
    /// Ordered justification strings
    pub why: Vec<String>,
    /// Raw confidence out of a rule, snapped band after normalization
    pub confidence: f64,
    pub scope: Scope,
    /// Set when the weekly insight is also present in the monthly window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency_weeks: Option<u32>,
}

impl Insight {
    /// Create an insight using the rule's registered title
    pub fn new(
        rule: RuleId,
        summary: impl Into<String>,
        why: Vec<String>,
        confidence: f64,
        scope: Scope,
    ) -> Self {
        Self {
            rule,
            title: rule.title().to_string(),
            summary: summary.into(),
            why,
            confidence,
            scope,
            consistency_weeks: None,
        }
    }

    /// Override the display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn kind(&self) -> InsightKind {
        self.rule.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parsing() {
        assert_eq!(Scope::from_str("weekly").unwrap(), Scope::Weekly);
        assert_eq!(Scope::from_str("Monthly").unwrap(), Scope::Monthly);
        assert!(Scope::from_str("daily").is_err());
    }

    #[test]
    fn test_scope_lookback() {
        let config = EngineConfig::default();
        assert_eq!(Scope::Weekly.lookback_days(&config), 14);
        assert_eq!(Scope::Monthly.lookback_days(&config), 45);
    }

    #[test]
    fn test_rule_keys_are_unique() {
        let mut keys: Vec<_> = RuleId::BUILTIN.iter().map(|r| r.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), RuleId::BUILTIN.len());

        for rule in RuleId::BUILTIN {
            assert_eq!(RuleId::from_key(rule.key()), Some(rule));
        }
        assert_eq!(RuleId::from_key("nope"), None);
    }

    #[test]
    fn test_weight_registry_default() {
        assert_eq!(confidence_weight(RuleId::SleepMood), 1.0);
        assert_eq!(confidence_weight(RuleId::GymMoodStability), 0.8);
        assert_eq!(
            confidence_weight(RuleId::Custom("hydration_focus")),
            DEFAULT_CONFIDENCE_WEIGHT
        );
    }

    #[test]
    fn test_only_crash_forecast_is_prediction() {
        for rule in RuleId::BUILTIN {
            let expected = if rule == RuleId::EnergyCrash {
                InsightKind::Prediction
            } else {
                InsightKind::Insight
            };
            assert_eq!(rule.kind(), expected);
        }
    }

    #[test]
    fn test_insight_serializes_rule_key() {
        let insight = Insight::new(
            RuleId::WorkMood,
            "summary",
            vec!["a".to_string()],
            0.8,
            Scope::Weekly,
        );
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["rule"], "work_mood");
        assert_eq!(json["scope"], "weekly");
        assert!(json.get("consistency_weeks").is_none());
    }
}
