//! Insight Engine - orchestrates rules, confidence, stability and persistence

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::EngineConfig;
use crate::normalize::NormalizedLog;
use crate::Result;

use super::confidence;
use super::consistency::tag_consistency;
use super::rules;
use super::stability::filter_stable_insights;
use super::types::{Insight, RuleId, Scope};

/// A single pattern detector
pub trait Rule: Send + Sync {
    /// Stable identity for this rule
    fn id(&self) -> RuleId;

    /// Evaluate the rule over a normalized window
    fn analyze(&self, logs: &[NormalizedLog], scope: Scope) -> Option<Insight>;
}

/// A rule backed by a plain function
pub struct FnRule {
    id: RuleId,
    analyze: fn(&[NormalizedLog], Scope) -> Option<Insight>,
}

impl FnRule {
    pub fn new(id: RuleId, analyze: fn(&[NormalizedLog], Scope) -> Option<Insight>) -> Self {
        Self { id, analyze }
    }
}

impl Rule for FnRule {
    fn id(&self) -> RuleId {
        self.id
    }

    fn analyze(&self, logs: &[NormalizedLog], scope: Scope) -> Option<Insight> {
        (self.analyze)(logs, scope)
    }
}

/// The six built-in rules, in evaluation order
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(FnRule::new(RuleId::SleepMood, rules::sleep_vs_mood)),
        Box::new(FnRule::new(RuleId::MeetingsEnergy, rules::meetings_vs_energy)),
        Box::new(FnRule::new(RuleId::GymMoodStability, rules::gym_vs_mood_stability)),
        Box::new(FnRule::new(RuleId::WorkMood, rules::work_hours_vs_mood)),
        Box::new(FnRule::new(RuleId::SleepLagEnergy, rules::sleep_lag_vs_energy)),
        Box::new(FnRule::new(RuleId::EnergyCrash, rules::predict_energy_crash)),
    ]
}

/// Source of normalized logs for one user, ending at a fixed date
pub trait LogProvider {
    fn normalized_logs(&self, lookback_days: u32) -> Result<Vec<NormalizedLog>>;
}

/// Destination for surfaced-insight events
///
/// Implementations must skip duplicates so repeated or concurrent runs for
/// the same user and period are harmless.
pub trait InsightSink {
    /// Returns the number of newly recorded events
    fn record_insight_events(
        &self,
        user_id: &str,
        insights: &[Insight],
        period_start: NaiveDate,
    ) -> Result<usize>;
}

/// First day of the reporting period used to deduplicate events
pub fn period_start(scope: Scope, as_of: NaiveDate) -> NaiveDate {
    match scope {
        Scope::Weekly => {
            as_of - Duration::days(i64::from(as_of.weekday().num_days_from_monday()))
        }
        Scope::Monthly => as_of.with_day(1).unwrap_or(as_of),
    }
}

/// Crash probability implied by an insight set
///
/// Returns the confidence of the energy-crash forecast if it survived the
/// pipeline, otherwise zero.
pub fn crash_probability(insights: &[Insight]) -> f64 {
    insights
        .iter()
        .find(|i| i.rule == RuleId::EnergyCrash)
        .map(|i| i.confidence)
        .unwrap_or(0.0)
}

/// The main insight engine
pub struct InsightEngine {
    rules: Vec<Box<dyn Rule>>,
    config: EngineConfig,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules and default config
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            rules: builtin_rules(),
            config,
        }
    }

    /// Register an additional rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Run every rule over the window, discarding the ones that did not fire
    pub fn raw_insights(&self, logs: &[NormalizedLog], scope: Scope) -> Vec<Insight> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let result = rule.analyze(logs, scope);
                tracing::debug!(
                    rule = rule.id().key(),
                    fired = result.is_some(),
                    "Rule evaluated"
                );
                result
            })
            .collect()
    }

    /// Full pipeline: rules, confidence, stability
    pub fn compute_insights(&self, logs: &[NormalizedLog], scope: Scope) -> Vec<Insight> {
        let raw = self.raw_insights(logs, scope);
        let visible = confidence::process(raw);
        let stable = filter_stable_insights(&self.rules, logs, scope, visible);

        tracing::debug!(
            scope = scope.as_str(),
            logs = logs.len(),
            insights = stable.len(),
            "Insight pipeline complete"
        );
        stable
    }

    /// Run the pipeline for `scope`; weekly results are tagged with their
    /// agreement against the monthly window
    pub fn compute_consistent_insights(
        &self,
        provider: &dyn LogProvider,
        scope: Scope,
    ) -> Result<Vec<Insight>> {
        let (monthly, weekly) = self.consistent_sets(provider, scope)?;
        Ok(weekly.unwrap_or(monthly))
    }

    /// Consistent run that also records events for every scope it computed
    ///
    /// The monthly set is recorded under its own period even when only the
    /// weekly view is returned.
    pub fn run_consistent_and_persist(
        &self,
        provider: &dyn LogProvider,
        sink: &dyn InsightSink,
        user_id: &str,
        scope: Scope,
        as_of: NaiveDate,
    ) -> Result<Vec<Insight>> {
        let (monthly, weekly) = self.consistent_sets(provider, scope)?;
        self.run_and_persist(sink, user_id, Scope::Monthly, as_of, &monthly);

        match weekly {
            Some(weekly) => {
                self.run_and_persist(sink, user_id, Scope::Weekly, as_of, &weekly);
                Ok(weekly)
            }
            None => Ok(monthly),
        }
    }

    /// Monthly insights, plus tagged weekly insights unless `scope` is monthly
    fn consistent_sets(
        &self,
        provider: &dyn LogProvider,
        scope: Scope,
    ) -> Result<(Vec<Insight>, Option<Vec<Insight>>)> {
        let monthly_logs = provider.normalized_logs(Scope::Monthly.lookback_days(&self.config))?;
        let monthly = self.compute_insights(&monthly_logs, Scope::Monthly);

        if scope == Scope::Monthly {
            return Ok((monthly, None));
        }

        let weekly_logs = provider.normalized_logs(Scope::Weekly.lookback_days(&self.config))?;
        let weekly = self.compute_insights(&weekly_logs, Scope::Weekly);
        let tagged = tag_consistency(weekly, &monthly);

        Ok((monthly, Some(tagged)))
    }

    /// Record surfaced insights; failures are logged, never propagated
    ///
    /// Returns the number of newly recorded events (zero on failure).
    pub fn run_and_persist(
        &self,
        sink: &dyn InsightSink,
        user_id: &str,
        scope: Scope,
        as_of: NaiveDate,
        insights: &[Insight],
    ) -> usize {
        if insights.is_empty() || !self.config.record_events {
            return 0;
        }

        match sink.record_insight_events(user_id, insights, period_start(scope, as_of)) {
            Ok(count) => {
                tracing::info!(
                    user = user_id,
                    scope = scope.as_str(),
                    recorded = count,
                    "Insight events recorded"
                );
                count
            }
            Err(e) => {
                tracing::warn!(
                    user = user_id,
                    scope = scope.as_str(),
                    error = %e,
                    "Failed to record insight events"
                );
                0
            }
        }
    }
}
